//! Fullscreen capability
//!
//! The dashboard only needs enter/exit/query; the windowing specifics
//! stay behind this trait so hosts with different window backends plug
//! in their own adapter at startup.

pub trait FullscreenControl {
    fn enter(&mut self);
    fn exit(&mut self);
    fn is_active(&self) -> bool;

    fn toggle(&mut self) {
        if self.is_active() {
            self.exit();
        } else {
            self.enter();
        }
    }
}

/// egui-backed adapter using viewport commands.
pub struct EguiFullscreen<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiFullscreen<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl FullscreenControl for EguiFullscreen<'_> {
    fn enter(&mut self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
    }

    fn exit(&mut self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
    }

    fn is_active(&self) -> bool {
        self.ctx
            .input(|i| i.viewport().fullscreen.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeFullscreen {
        active: bool,
    }

    impl FullscreenControl for FakeFullscreen {
        fn enter(&mut self) {
            self.active = true;
        }
        fn exit(&mut self) {
            self.active = false;
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[test]
    fn toggle_flips_state() {
        let mut fs = FakeFullscreen { active: false };
        fs.toggle();
        assert!(fs.is_active());
        fs.toggle();
        assert!(!fs.is_active());
    }
}
