/// ResultBoard: the display slots the round logic writes into.
///
/// Every slot is optional. An unbound slot makes its write step a no-op;
/// the remaining steps of a round still run.

use glam::Vec3;

use crate::domain::hand::Sprite;

pub const PROMPT_TEXT: &str = "Make your choice!";

#[derive(Clone, Debug, PartialEq)]
pub struct TextSlot {
    pub text: String,
    /// Local scale, driven by the pop animation / clip animator.
    pub scale: Vec3,
}

impl TextSlot {
    pub fn new() -> Self {
        TextSlot { text: String::new(), scale: Vec3::ONE }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ImageSlot {
    pub sprite: Option<Sprite>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ResultBoard {
    pub result: Option<TextSlot>,
    pub score_you: Option<TextSlot>,
    pub score_com: Option<TextSlot>,
    pub img_you: Option<ImageSlot>,
    pub img_com: Option<ImageSlot>,
}

impl ResultBoard {
    /// Board with every slot bound.
    pub fn bound() -> Self {
        ResultBoard {
            result: Some(TextSlot::new()),
            score_you: Some(TextSlot::new()),
            score_com: Some(TextSlot::new()),
            img_you: Some(ImageSlot::default()),
            img_com: Some(ImageSlot::default()),
        }
    }

    /// Board with nothing bound.
    pub fn set_result(&mut self, text: &str) {
        if let Some(slot) = &mut self.result {
            slot.text.clear();
            slot.text.push_str(text);
        }
    }

    pub fn set_scores(&mut self, you: u32, com: u32) {
        if let Some(slot) = &mut self.score_you {
            slot.text = you.to_string();
        }
        if let Some(slot) = &mut self.score_com {
            slot.text = com.to_string();
        }
    }

    pub fn set_images(&mut self, you: Option<Sprite>, com: Option<Sprite>) {
        if let Some(slot) = &mut self.img_you {
            slot.sprite = you;
        }
        if let Some(slot) = &mut self.img_com {
            slot.sprite = com;
        }
    }

    pub fn result_scale(&self) -> Option<Vec3> {
        self.result.as_ref().map(|s| s.scale)
    }

    pub fn set_result_scale(&mut self, scale: Vec3) {
        if let Some(slot) = &mut self.result {
            slot.scale = scale;
        }
    }
}

#[cfg(test)]
impl ResultBoard {
    /// Board with no slots bound at all.
    pub fn unbound() -> Self {
        ResultBoard::default()
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result.as_ref().map(|s| s.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_writes_are_noops() {
        let mut b = ResultBoard::unbound();
        b.set_result("You WIN!");
        b.set_scores(1, 0);
        b.set_images(Some(Sprite::Rock), None);
        b.set_result_scale(Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(b, ResultBoard::unbound());
    }

    #[test]
    fn partial_binding_writes_what_exists() {
        let mut b = ResultBoard { score_com: Some(TextSlot::new()), ..ResultBoard::unbound() };
        b.set_scores(4, 2);
        assert_eq!(b.score_com.as_ref().map(|s| s.text.as_str()), Some("2"));
        assert!(b.score_you.is_none());
    }
}
