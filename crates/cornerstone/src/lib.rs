#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use cornerstone_image as image;

#[doc(inline)]
pub use cornerstone_imgproc as imgproc;
