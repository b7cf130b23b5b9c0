use std::str::FromStr;

use crate::config::Format;
use crate::data::{MapCell, Pos};
use crate::level::{Level, LevelErr};
use crate::map::Grid;
use crate::state::State;
use crate::vec2d::Vec2d;

impl FromStr for Level {
    type Err = LevelErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Classic levels mark goals with `G` which XSB never uses.
pub fn detect_format(level: &str) -> Format {
    if level.contains('G') {
        Format::Classic
    } else {
        Format::Xsb
    }
}

pub fn parse(level: &str) -> Result<Level, LevelErr> {
    parse_format(level, detect_format(level))
}

pub fn parse_format(level: &str, format: Format) -> Result<Level, LevelErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut grid = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            let pos = Pos::new(r as i32, c as i32);
            let tile = match format {
                Format::Classic => parse_classic(cur_char),
                Format::Xsb => parse_xsb(cur_char),
            };
            let (cell, has_box, has_player) = tile.ok_or(LevelErr::Pos(r, c))?;
            if has_box {
                boxes.push(pos);
            }
            if has_player {
                if player_pos.is_some() {
                    return Err(LevelErr::MultiplePlayers);
                }
                player_pos = Some(pos);
            }
            line_tiles.push(cell);
        }
        grid.push(line_tiles);
    }

    let player_pos = player_pos.ok_or(LevelErr::NoPlayer)?;
    let grid = Grid::new(Vec2d::new(&grid))?;
    Level::new(grid, State::new(player_pos, boxes))
}

/// Returns the cell and whether there is a box and the player on it.
fn parse_classic(c: char) -> Option<(MapCell, bool, bool)> {
    let tile = match c {
        '#' => (MapCell::Wall, false, false),
        '@' => (MapCell::Empty, false, true),
        '$' => (MapCell::Empty, true, false),
        'G' => (MapCell::Goal, false, false),
        '*' => (MapCell::Goal, true, false),
        '+' => (MapCell::Goal, false, true),
        '.' | ' ' => (MapCell::Empty, false, false),
        _ => return None,
    };
    Some(tile)
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
fn parse_xsb(c: char) -> Option<(MapCell, bool, bool)> {
    let tile = match c {
        '#' => (MapCell::Wall, false, false),
        'p' | '@' => (MapCell::Empty, false, true),
        'P' | '+' => (MapCell::Goal, false, true),
        'b' | '$' => (MapCell::Empty, true, false),
        'B' | '*' => (MapCell::Goal, true, false),
        '.' => (MapCell::Goal, false, false),
        ' ' | '-' | '_' => (MapCell::Empty, false, false),
        _ => return None,
    };
    Some(tile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_failure("", LevelErr::NoPlayer);
    }

    #[test]
    fn fail_no_player() {
        let level = r"
#####
# $.#
#####
";
        assert_failure(level, LevelErr::NoPlayer);
    }

    #[test]
    fn fail_multiple_players() {
        let level = r"
######
#@$.@#
######
";
        assert_failure(level, LevelErr::MultiplePlayers);
    }

    #[test]
    fn fail_no_boxes() {
        let level = r"
#####
#@ .#
#####
";
        assert_failure(level, LevelErr::NoBoxes);
    }

    #[test]
    fn fail_no_goals() {
        let level = r"
#####
#@$ #
#####
";
        assert_failure(level, LevelErr::NoGoals);
    }

    #[test]
    fn fail_boxes_goals() {
        let level = r"
#######
#@$.$G#
#######
";
        assert_failure(level, LevelErr::BoxesGoals { boxes: 2, goals: 1 });
    }

    #[test]
    fn fail_pos() {
        let level = r"
#####
#@X.#
#####
";
        assert_failure(level, LevelErr::Pos(1, 2));
    }

    #[test]
    fn classic_dots_are_floor() {
        let level = r"
#######
#@.$.G#
#.#.#.#
#.$.G.#
#######
";
        assert_eq!(detect_format(level), Format::Classic);
        let level: Level = level.parse().unwrap();
        assert_eq!(level.state.player_pos, Pos::new(1, 1));
        assert_eq!(level.state.boxes(), &[Pos::new(1, 3), Pos::new(3, 2)]);
        assert_eq!(level.grid.goals(), &[Pos::new(1, 5), Pos::new(3, 4)]);
        assert!(!level.grid.is_wall(Pos::new(2, 1)));
        assert!(level.grid.is_wall(Pos::new(2, 2)));
    }

    #[test]
    fn classic_mixed_floor() {
        let level = r"
#######
#@.$ G#
#.#.#.#
#.$ G #
#######
";
        let level: Level = level.parse().unwrap();
        assert_eq!(level.grid.goals(), &[Pos::new(1, 5), Pos::new(3, 4)]);
        assert_eq!(level.grid.rows(), 5);
        assert_eq!(level.grid.cols(), 7);
    }

    #[test]
    fn xsb_round_trip() {
        let level = r"
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
";
        assert_eq!(detect_format(level), Format::Xsb);
        let parsed = parse_format(level, Format::Xsb).unwrap();
        assert_eq!(parsed.to_string(), level.trim_start_matches('\n'));
        assert_eq!(parsed.state.boxes().len(), 6);
    }

    fn assert_failure(input_level: &str, expected_err: LevelErr) {
        assert_eq!(input_level.parse::<Level>().unwrap_err(), expected_err);
    }
}
