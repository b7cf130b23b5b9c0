use crate::data::Pos;

/// Player position and box positions.
///
/// Boxes are kept sorted so that derived equality and hashing treat them as a set.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub player_pos: Pos,
    boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        boxes.dedup();
        State { player_pos, boxes }
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// Moves the player and relocates the box at `from` to `to`.
    pub(crate) fn with_push(&self, player_pos: Pos, from: Pos, to: Pos) -> State {
        let mut boxes = self.boxes.clone();
        if let Ok(i) = boxes.binary_search(&from) {
            boxes.remove(i);
        }
        // `to` is never occupied here - the caller checked
        let i = boxes.binary_search(&to).unwrap_or_else(|i| i);
        boxes.insert(i, to);
        State { player_pos, boxes }
    }

    pub(crate) fn with_player(&self, player_pos: Pos) -> State {
        State {
            player_pos,
            boxes: self.boxes.clone(),
        }
    }
}
