// Application layer - Use case interactors

pub mod container;
pub mod edit_interactor;
pub mod list_interactor;
pub mod transcribe_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use edit_interactor::EditInteractor;
pub use list_interactor::ListInteractor;
pub use transcribe_interactor::TranscribeInteractor;
