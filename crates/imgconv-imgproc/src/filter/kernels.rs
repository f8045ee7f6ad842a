/// A 3x3 convolution kernel, indexed as `kernel[row][col]`.
pub type Kernel3 = [[f32; 3]; 3];

/// Create the 3x3 sobel kernels.
///
/// # Returns
///
/// The horizontal gradient kernel `Gx` and the vertical gradient kernel `Gy`.
///
/// ```
/// use imgconv_imgproc::filter::kernels::sobel_kernels_3x3;
///
/// let (kx, ky) = sobel_kernels_3x3();
/// assert_eq!(kx[1], [-2.0, 0.0, 2.0]);
/// assert_eq!(ky[2], [1.0, 2.0, 1.0]);
/// ```
pub fn sobel_kernels_3x3() -> (Kernel3, Kernel3) {
    let (derivative, smooth) = sobel_kernel_1d();

    // the 2d kernels are the outer products of the separable 1d kernels
    let mut kernel_x = [[0.0; 3]; 3];
    let mut kernel_y = [[0.0; 3]; 3];
    for r in 0..3 {
        for c in 0..3 {
            kernel_x[r][c] = smooth[r] * derivative[c];
            kernel_y[r][c] = derivative[r] * smooth[c];
        }
    }

    (kernel_x, kernel_y)
}

/// Create the separable 1d sobel kernels of size 3.
///
/// # Returns
///
/// The derivative kernel and the smoothing kernel.
pub fn sobel_kernel_1d() -> ([f32; 3], [f32; 3]) {
    ([-1.0, 0.0, 1.0], [1.0, 2.0, 1.0])
}
