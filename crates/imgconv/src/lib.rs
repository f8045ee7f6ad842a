#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use imgconv_image as image;

#[doc(inline)]
pub use imgconv_imgproc as imgproc;

#[doc(inline)]
pub use imgconv_io as io;
