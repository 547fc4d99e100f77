pub mod descriptor;
pub mod handlers;

pub use descriptor::ExposureFileDescriptor;
pub use handlers::{
    ExposureFileAppState, create_exposure_file, get_exposure_file, get_exposure_overview,
    list_exposure_files,
};
