use thiserror::Error;

pub type TableauResult<T> = Result<T, TableauError>;

#[derive(Debug, Error)]
pub enum TableauError {
    #[error("transform stack underflow: pop with only the base matrix left")]
    StackUnderflow,
    #[error("projection for a {0}x{1} viewport is not invertible")]
    SingularProjection(u32, u32),
    #[error("no graphics adapter compatible with the window surface")]
    NoAdapter,
    #[error("failed to request graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
