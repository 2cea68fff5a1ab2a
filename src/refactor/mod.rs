mod file_eraser;
mod xml_eraser;

pub use file_eraser::FileResourceEraser;
pub use xml_eraser::XmlBlockEraser;
