/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failed to initialize the process-wide windowing library.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Failed to create the native window.
    #[error("Window creation error: {0}")]
    WindowCreation(String),

    /// Failed to create the GL context or load its entry points.
    #[error("Context error: {0}")]
    ContextLoad(String),

    /// Shader compilation or program linking errors.
    #[error("Shader error: {0}")]
    Shader(String),

    /// GL object creation or management errors.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Shader source could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// `glGetError` reported a code after a frame was drawn.
    #[error("GL error 0x{0:04X} during frame")]
    Frame(u32),
}

impl Error {
    // Initialization errors
    pub fn event_loop_failed(detail: impl std::fmt::Display) -> Self {
        Self::Initialization(format!("Failed to create event loop: {detail}"))
    }

    pub fn window_creation_failed(detail: impl std::fmt::Display) -> Self {
        Self::WindowCreation(format!("Failed to create window: {detail}"))
    }

    pub fn display_failed(detail: impl std::fmt::Display) -> Self {
        Self::ContextLoad(format!("Failed to open GL display: {detail}"))
    }

    pub fn no_suitable_config() -> Self {
        Self::ContextLoad("No suitable GL framebuffer config".to_string())
    }

    pub fn context_creation_failed(detail: impl std::fmt::Display) -> Self {
        Self::ContextLoad(format!("Failed to create GL context: {detail}"))
    }

    pub fn function_loading_failed(symbol: &str) -> Self {
        Self::ContextLoad(format!("Failed to load GL function: {symbol}"))
    }

    // Shader errors
    pub fn shader_creation_failed(detail: &str) -> Self {
        Self::Shader(format!("Shader creation failed: {detail}"))
    }

    pub fn shader_compile_failed(stage: &str, log: &str) -> Self {
        Self::Shader(format!("{stage} shader compilation failed: {}", log.trim_end()))
    }

    pub fn shader_program_creation_failed(detail: &str) -> Self {
        Self::Shader(format!("Shader program creation failed: {detail}"))
    }

    pub fn shader_link_failed(log: &str) -> Self {
        Self::Shader(format!("Shader linking failed: {}", log.trim_end()))
    }

    // Resource errors
    pub fn buffer_creation_failed(buffer_type: &str) -> Self {
        Self::Resource(format!("Failed to create {buffer_type} buffer"))
    }

    pub fn vertex_array_creation_failed() -> Self {
        Self::Resource("Failed to create vertex array object".to_string())
    }

    pub fn texture_creation_failed() -> Self {
        Self::Resource("Failed to create texture".to_string())
    }

    pub fn invalid_mesh(detail: impl std::fmt::Display) -> Self {
        Self::Resource(format!("Invalid mesh: {detail}"))
    }

    pub fn surface_failed(detail: impl std::fmt::Display) -> Self {
        Self::Resource(format!("Surface error: {detail}"))
    }

    // Data errors
    pub fn shader_source_unreadable(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io(format!("Failed to read shader source {}: {err}", path.display()))
    }

    /// Process exit status for this error; `255` mirrors the `-1` returned when
    /// the windowing library or context could not be brought up.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Initialization(_) | Self::WindowCreation(_) | Self::ContextLoad(_) => 255,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::event_loop_failed("boom").exit_code(), 255);
        assert_eq!(Error::window_creation_failed("no display").exit_code(), 255);
        assert_eq!(Error::function_loading_failed("glGetString").exit_code(), 255);
        assert_eq!(Error::shader_link_failed("error").exit_code(), 1);
        assert_eq!(Error::vertex_array_creation_failed().exit_code(), 1);
        assert_eq!(Error::Frame(0x0500).exit_code(), 1);
    }

    #[test]
    fn test_frame_error_message() {
        assert_eq!(Error::Frame(0x0502).to_string(), "GL error 0x0502 during frame");
    }

    #[test]
    fn test_compile_message_trims_log() {
        let err = Error::shader_compile_failed("vertex", "0:1(1): error: syntax error\n");
        assert_eq!(
            err.to_string(),
            "Shader error: vertex shader compilation failed: 0:1(1): error: syntax error"
        );
    }
}
