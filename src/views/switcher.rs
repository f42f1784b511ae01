/// Chooses between the landing page and the management view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewSwitcher {
    show_manager: bool,
}

impl ViewSwitcher {
    pub fn open_manager(&mut self) {
        self.show_manager = true;
    }

    pub fn back(&mut self) {
        self.show_manager = false;
    }

    pub fn showing_manager(&self) -> bool {
        self.show_manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_landing_and_toggles() {
        let mut switcher = ViewSwitcher::default();
        assert!(!switcher.showing_manager());
        switcher.open_manager();
        assert!(switcher.showing_manager());
        switcher.back();
        assert!(!switcher.showing_manager());
    }
}
