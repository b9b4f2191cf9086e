// src/io/reader.rs
use gdal::raster::Buffer;
use gdal::vsi;
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::error::{NdviError, Result};

static NEXT_MEM_FILE: AtomicU64 = AtomicU64::new(0);

/// A file registered in GDAL's `/vsimem/` filesystem, unlinked on drop.
struct VsiMemFile {
    path: String,
}

impl VsiMemFile {
    fn create(data: Vec<u8>) -> Result<Self> {
        let id = NEXT_MEM_FILE.fetch_add(1, Ordering::Relaxed);
        let path = format!("/vsimem/ndvi-calc/{}-{id}.tif", std::process::id());
        vsi::create_mem_file(&path, data).map_err(|e| NdviError::Io(e.to_string()))?;
        Ok(Self { path })
    }
}

impl Drop for VsiMemFile {
    fn drop(&mut self) {
        if let Err(e) = vsi::unlink_mem_file(&self.path) {
            warn!(path = %self.path, error = %e, "failed to unlink in-memory raster");
        }
    }
}

/// A raster decoded from an in-memory buffer.
///
/// The dataset is declared before the backing file so that it is closed
/// before the file is unlinked.
pub struct DecodedRaster {
    dataset: Dataset,
    _mem_file: VsiMemFile,
}

impl DecodedRaster {
    /// Decodes an encoded raster (GeoTIFF or any raster format GDAL can open)
    /// without touching the disk.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(NdviError::Io("raster buffer is empty".to_string()));
        }

        let len = bytes.len();
        let mem_file = VsiMemFile::create(bytes)?;
        // Raster drivers only, so vector files fail to decode
        let options = DatasetOptions {
            open_flags: GdalOpenFlags::GDAL_OF_RASTER | GdalOpenFlags::GDAL_OF_READONLY,
            ..Default::default()
        };
        let dataset = Dataset::open_ex(&mem_file.path, options)
            .map_err(|e| NdviError::Io(e.to_string()))?;

        debug!(
            bytes = len,
            bands = dataset.raster_count(),
            size = ?dataset.raster_size(),
            "decoded raster"
        );

        Ok(Self {
            dataset,
            _mem_file: mem_file,
        })
    }

    pub fn band_count(&self) -> usize {
        self.dataset.raster_count()
    }

    /// (width, height) in pixels
    pub fn size(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }

    /// Reads a whole band (1-indexed) promoted to `f32`.
    pub fn read_band(&self, index: usize) -> Result<Buffer<f32>> {
        let band = self
            .dataset
            .rasterband(index)
            .map_err(|e| NdviError::Io(e.to_string()))?;
        let size = band.size();

        let buffer = band
            .read_as::<f32>((0, 0), size, size, None)
            .map_err(|e| NdviError::Io(e.to_string()))?;

        debug!(band = index, size = ?size, "read band");
        Ok(buffer)
    }
}
