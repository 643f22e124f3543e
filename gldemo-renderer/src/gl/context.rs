use crate::gl::GlBackend;

/// Tracks simple GL state to skip redundant state changes.
///
/// Every setter compares against the cached value and only calls into GL when
/// it differs, so it must be the only path that changes these settings on its
/// context.
#[derive(Debug)]
pub struct GlState {
    // [x, y, width, height]
    viewport: [i32; 4],
    clear_color: [f32; 4],
    depth_test: bool,
}

impl GlState {
    /// Creates the state of a freshly created context: empty viewport,
    /// transparent black clear color, depth testing off.
    pub fn new() -> Self {
        Self {
            viewport: [0, 0, 0, 0],
            clear_color: [0.0, 0.0, 0.0, 0.0],
            depth_test: false,
        }
    }

    /// Sets the viewport rectangle.
    ///
    /// # Parameters
    /// * `gl` - Context the state belongs to
    /// * `x`, `y` - Lower-left corner in pixels
    /// * `width`, `height` - Size in pixels
    pub fn viewport<G: GlBackend>(&mut self, gl: &G, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        let new_viewport = [x, y, width, height];
        if self.viewport != new_viewport {
            gl.viewport(x, y, width, height);
            self.viewport = new_viewport;
        }
        self
    }

    /// Sets the color used by `glClear`.
    pub fn clear_color<G: GlBackend>(&mut self, gl: &G, r: f32, g: f32, b: f32, a: f32) -> &mut Self {
        let new_color = [r, g, b, a];
        if self.clear_color != new_color {
            gl.clear_color(r, g, b, a);
            self.clear_color = new_color;
        }
        self
    }

    /// Enables or disables `GL_DEPTH_TEST`.
    pub fn depth_test<G: GlBackend>(&mut self, gl: &G, enable: bool) -> &mut Self {
        if self.depth_test != enable {
            Self::capability(gl, glow::DEPTH_TEST, enable);
            self.depth_test = enable;
        }
        self
    }

    /// Returns the cached viewport (width, height).
    pub fn viewport_size(&self) -> (i32, i32) {
        (self.viewport[2], self.viewport[3])
    }

    fn capability<G: GlBackend>(gl: &G, capability: u32, enable: bool) {
        if enable {
            gl.enable(capability);
        } else {
            gl.disable(capability);
        }
    }
}

impl Default for GlState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::testing::RecordingGl;

    #[test]
    fn test_redundant_changes_are_skipped() {
        let gl = RecordingGl::new();
        let mut state = GlState::new();

        state.viewport(&gl, 0, 0, 640, 480).viewport(&gl, 0, 0, 640, 480);
        state.clear_color(&gl, 0.0, 0.0, 0.0, 1.0).clear_color(&gl, 0.0, 0.0, 0.0, 1.0);
        state.depth_test(&gl, true).depth_test(&gl, true);

        assert_eq!(gl.count("viewport"), 1);
        assert_eq!(gl.count("clear_color"), 1);
        assert_eq!(gl.count("enable"), 1);
        assert_eq!(state.viewport_size(), (640, 480));
    }

    #[test]
    fn test_depth_test_toggle() {
        let gl = RecordingGl::new();
        let mut state = GlState::new();

        state.depth_test(&gl, false);
        assert!(gl.calls().is_empty());

        state.depth_test(&gl, true).depth_test(&gl, false);
        assert_eq!(
            gl.calls(),
            vec![
                format!("enable({:#06x})", glow::DEPTH_TEST),
                format!("disable({:#06x})", glow::DEPTH_TEST),
            ]
        );
    }
}
