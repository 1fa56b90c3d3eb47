use cudarc::driver::safe::*;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::geometry::types::{AffineMatrix, CanvasGeometry};
use crate::image_pipeline::pnm::types::GrayRaster;
use crate::image_pipeline::warp::backend::AffineWarp;

#[allow(non_upper_case_globals)]
#[allow(non_camel_case_types)]
#[allow(non_snake_case)]
#[allow(dead_code)]
mod npp {
    include!(concat!(env!("OUT_DIR"), "/npp_bindings.rs"));
}

/// 8-bit single-channel image resident on the device.
///
/// Owns its allocation; dropping it frees the device memory, so buffers are
/// released on error paths as well as on success.
pub struct DeviceRaster {
    data: CudaSlice<u8>,
    width: usize,
    height: usize,
    pitch: usize,
}

impl DeviceRaster {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    fn size(&self) -> npp::NppiSize {
        npp::NppiSize {
            width: self.width as i32,
            height: self.height as i32,
        }
    }

    fn full_roi(&self) -> npp::NppiRect {
        npp::NppiRect {
            x: 0,
            y: 0,
            width: self.width as i32,
            height: self.height as i32,
        }
    }
}

/// CUDA encodes versions as `1000 * major + 10 * minor`.
pub fn split_cuda_version(version: i32) -> (i32, i32) {
    (version / 1000, (version % 100) / 10)
}

/// Explicit CUDA/NPP session: device context, stream and library version.
///
/// Created once at startup and passed to everything that touches the device.
pub struct NppSession {
    stream: Arc<CudaStream>,
    version: (i32, i32, i32),
    driver_version: i32,
    runtime_version: i32,
}

impl NppSession {
    /// Initialize the CUDA context on `device_ordinal` and query NPP.
    pub fn new(device_ordinal: usize) -> anyhow::Result<Self> {
        // cudarc panics instead of erroring when libcuda cannot be loaded.
        let ctx = std::panic::catch_unwind(|| CudaContext::new(device_ordinal))
            .map_err(|_| anyhow::anyhow!("CUDA driver library could not be loaded"))??;
        let stream = ctx.default_stream();

        let version = unsafe {
            let lib = npp::nppGetLibVersion();
            if lib.is_null() {
                anyhow::bail!("nppGetLibVersion returned no version information");
            }
            ((*lib).major, (*lib).minor, (*lib).build)
        };

        let mut driver_version = 0;
        unsafe { cudarc::driver::sys::cuDriverGetVersion(&mut driver_version) }.result()?;

        let mut runtime_version = 0;
        let status = unsafe { npp::cudaRuntimeGetVersion(&mut runtime_version) };
        if status != 0 {
            anyhow::bail!("cudaRuntimeGetVersion failed with status {}", status);
        }

        let session = Self {
            stream,
            version,
            driver_version,
            runtime_version,
        };
        info!("{} on CUDA device {}", session.describe(), device_ordinal);

        Ok(session)
    }

    pub fn version(&self) -> (i32, i32, i32) {
        self.version
    }

    /// CUDA driver and runtime versions as `(major, minor)` pairs.
    pub fn cuda_versions(&self) -> ((i32, i32), (i32, i32)) {
        (
            split_cuda_version(self.driver_version),
            split_cuda_version(self.runtime_version),
        )
    }

    /// One-shot host to device copy of a packed raster.
    pub fn upload(&self, raster: &GrayRaster) -> anyhow::Result<DeviceRaster> {
        let data = self.stream.clone_htod(&raster.to_packed())?;
        Ok(DeviceRaster {
            data,
            width: raster.width,
            height: raster.height,
            pitch: raster.width,
        })
    }

    pub fn alloc(&self, width: usize, height: usize) -> anyhow::Result<DeviceRaster> {
        if width == 0 || height == 0 {
            anyhow::bail!("refusing to allocate an empty {}x{} device image", width, height);
        }
        let len = width
            .checked_mul(height)
            .ok_or_else(|| anyhow::anyhow!("{}x{} device image size overflows", width, height))?;
        let data = self.stream.alloc_zeros::<u8>(len)?;
        Ok(DeviceRaster {
            data,
            width,
            height,
            pitch: width,
        })
    }

    pub fn download(&self, image: &DeviceRaster) -> anyhow::Result<GrayRaster> {
        let mut host = GrayRaster::try_filled(image.pitch, image.height, 0)?;
        host.width = image.width;
        self.download_into(image, &mut host)?;
        Ok(host)
    }

    /// Device to host copy into a raster allocated by the caller.
    pub fn download_into(&self, image: &DeviceRaster, host: &mut GrayRaster) -> anyhow::Result<()> {
        if host.data.len() != image.pitch * image.height {
            anyhow::bail!(
                "host buffer holds {} bytes, device image has {}",
                host.data.len(),
                image.pitch * image.height
            );
        }
        self.stream.memcpy_dtoh(&image.data, &mut host.data)?;
        host.stride = image.pitch;
        Ok(())
    }

    /// Synchronous bilinear `nppiWarpAffine_8u_C1R` over the full ROIs.
    pub fn warp(
        &self,
        src: &DeviceRaster,
        dst: &mut DeviceRaster,
        matrix: &AffineMatrix,
    ) -> anyhow::Result<()> {
        let src_size = src.size();
        let src_roi = src.full_roi();
        let dst_roi = dst.full_roi();
        let src_step = src.pitch as i32;
        let dst_step = dst.pitch as i32;

        unsafe {
            let (src_ptr, _src_guard) = src.data.device_ptr(&self.stream);
            let (dst_ptr, _dst_guard) = dst.data.device_ptr_mut(&self.stream);

            let status = npp::nppiWarpAffine_8u_C1R(
                src_ptr as *const npp::Npp8u,
                src_size,
                src_step,
                src_roi,
                dst_ptr as *mut npp::Npp8u,
                dst_step,
                dst_roi,
                matrix.coeffs().as_ptr(),
                npp::NppiInterpolationMode_NPPI_INTER_LINEAR as i32,
            );

            if status != 0 {
                anyhow::bail!("NPP warp affine failed with status {}", status);
            }
        }

        self.stream.synchronize()?;
        Ok(())
    }
}

impl AffineWarp for NppSession {
    fn describe(&self) -> String {
        let (major, minor, build) = self.version;
        let ((driver_major, driver_minor), (runtime_major, runtime_minor)) = self.cuda_versions();
        format!(
            "NPP Library Version {major}.{minor}.{build}, \
             CUDA Driver Version {driver_major}.{driver_minor}, \
             CUDA Runtime Version {runtime_major}.{runtime_minor}"
        )
    }

    #[instrument(skip_all, fields(dst_width = geometry.dst_width, dst_height = geometry.dst_height))]
    fn warp_affine(&self, src: &GrayRaster, geometry: &CanvasGeometry) -> Result<GrayRaster> {
        // Host side first: an unallocatable canvas fails before the device is used.
        let mut host_dst = GrayRaster::try_filled(geometry.dst_width, geometry.dst_height, 0)?;

        let d_src = self.upload(src)?;
        let mut d_dst = self.alloc(geometry.dst_width, geometry.dst_height)?;
        debug!(
            "Device buffers: src {}x{} (pitch {}), dst {}x{} (pitch {})",
            d_src.width(),
            d_src.height(),
            d_src.pitch(),
            d_dst.width(),
            d_dst.height(),
            d_dst.pitch()
        );

        self.warp(&d_src, &mut d_dst, &geometry.matrix)?;

        self.download_into(&d_dst, &mut host_dst)?;
        Ok(host_dst)
    }
}
