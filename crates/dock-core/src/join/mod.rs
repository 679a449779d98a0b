pub mod ratio;
pub mod session;
pub mod volume;

/// The two independently arriving sides of a join.
///
/// Either side may arrive first or be replaced later; `pair` yields both
/// only once both are present.
#[derive(Debug, Clone)]
pub struct JoinSlots<L, R> {
    left: Option<L>,
    right: Option<R>,
}

impl<L, R> Default for JoinSlots<L, R> {
    fn default() -> Self {
        JoinSlots {
            left: None,
            right: None,
        }
    }
}

impl<L, R> JoinSlots<L, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_left(&mut self, left: L) {
        self.left = Some(left);
    }

    pub fn set_right(&mut self, right: R) {
        self.right = Some(right);
    }

    pub fn left(&self) -> Option<&L> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&R> {
        self.right.as_ref()
    }

    pub fn pair(&self) -> Option<(&L, &R)> {
        Some((self.left.as_ref()?, self.right.as_ref()?))
    }

    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_needs_both_sides() {
        let mut slots: JoinSlots<u32, &str> = JoinSlots::new();
        assert!(slots.pair().is_none());
        slots.set_right("r");
        assert!(slots.pair().is_none());
        slots.set_left(1);
        assert_eq!(slots.pair(), Some((&1, &"r")));
    }

    #[test]
    fn test_replacing_a_side() {
        let mut slots: JoinSlots<u32, u32> = JoinSlots::new();
        slots.set_left(1);
        slots.set_right(2);
        slots.set_left(3);
        assert_eq!(slots.pair(), Some((&3, &2)));
        slots.clear();
        assert!(slots.left().is_none());
    }
}
