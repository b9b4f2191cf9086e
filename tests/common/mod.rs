// tests/common/mod.rs
#![allow(dead_code)]

use gdal::raster::{Buffer, GdalType};
use gdal::{vsi, DriverManager};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FIXTURE: AtomicUsize = AtomicUsize::new(0);

/// Encodes `bands` (row-major, `width * height` values each) as a GeoTIFF
/// and returns the file bytes.
pub fn geotiff<T: GdalType + Copy>(width: usize, height: usize, bands: &[Vec<T>]) -> Vec<u8> {
    let path = format!(
        "/vsimem/ndvi-calc-tests/fixture-{}.tif",
        NEXT_FIXTURE.fetch_add(1, Ordering::Relaxed)
    );

    {
        let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
        let dataset = driver
            .create_with_band_type::<T, _>(&path, width, height, bands.len())
            .unwrap();

        for (i, data) in bands.iter().enumerate() {
            let mut band = dataset.rasterband(i + 1).unwrap();
            let mut buffer = Buffer::new((width, height), data.clone());
            band.write((0, 0), (width, height), &mut buffer).unwrap();
        }
    }

    vsi::get_vsi_mem_file_bytes_owned(&path).unwrap()
}

/// Two-band f32 GeoTIFF with red in band 1 and NIR in band 2.
pub fn red_nir_geotiff(width: usize, height: usize, red: &[f32], nir: &[f32]) -> Vec<u8> {
    geotiff(width, height, &[red.to_vec(), nir.to_vec()])
}
