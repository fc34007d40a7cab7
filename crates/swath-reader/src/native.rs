//! Native NetCDF reading using the netcdf library.
//!
//! The netcdf crate wraps libnetcdf/HDF5; every value is read through the C
//! library's conversion to `f64`, then unpacked with the CF attributes.

use std::path::Path;
use std::sync::Once;

use swath_common::{GeophysicalVariable, Grid2D, Navigation, Swath, SwathError, SwathResult};
use tracing::{debug, warn};

use crate::{GEOPHYSICAL_GROUP, LATITUDE_VARIABLE, LONGITUDE_VARIABLE, NAVIGATION_GROUP};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This function disables that output by calling
/// H5Eset_auto2 with null handlers. It only needs to be called once per process,
/// but is safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read the navigation and geophysical groups of a Level-2 file.
///
/// Geophysical variables that are not 2-D are skipped. Everything else must
/// match the navigation shape.
pub fn read_swath(path: &Path, granule: &str) -> SwathResult<Swath> {
    silence_hdf5_errors();

    let file = netcdf::open(path).map_err(|e| SwathError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // Navigation
    let nav_group = file
        .group(NAVIGATION_GROUP)
        .map_err(|e| SwathError::InvalidFormat(format!("{}: {}", NAVIGATION_GROUP, e)))?
        .ok_or_else(|| SwathError::MissingGroup(NAVIGATION_GROUP.to_string()))?;

    let latitude = read_named_grid(&nav_group, NAVIGATION_GROUP, LATITUDE_VARIABLE)?;
    let longitude = read_named_grid(&nav_group, NAVIGATION_GROUP, LONGITUDE_VARIABLE)?;
    let navigation = Navigation::new(latitude, longitude)?;

    // Geophysical products
    let geo_group = file
        .group(GEOPHYSICAL_GROUP)
        .map_err(|e| SwathError::InvalidFormat(format!("{}: {}", GEOPHYSICAL_GROUP, e)))?
        .ok_or_else(|| SwathError::MissingGroup(GEOPHYSICAL_GROUP.to_string()))?;

    let mut variables = Vec::new();
    for var in geo_group.variables() {
        let name = var.name();
        let Some(shape) = grid_shape(&var) else {
            warn!(variable = %name, "Skipping geophysical variable that is not 2-D");
            continue;
        };
        let grid = read_grid(&var, shape)?;
        variables.push(GeophysicalVariable::new(name, grid));
    }

    debug!(
        granule = %granule,
        rows = navigation.shape().0,
        cols = navigation.shape().1,
        variables = variables.len(),
        "Loaded swath"
    );

    Swath::new(granule, navigation, variables)
}

// =============================================================================
// Internal helpers
// =============================================================================

fn read_named_grid(group: &netcdf::Group, group_name: &str, name: &str) -> SwathResult<Grid2D> {
    let var = group
        .variable(name)
        .ok_or_else(|| SwathError::missing_variable(group_name, name))?;
    let shape = grid_shape(&var).ok_or_else(|| {
        SwathError::InvalidFormat(format!("{}/{} is not a 2-D variable", group_name, name))
    })?;
    read_grid(&var, shape)
}

/// `(rows, cols)` of a 2-D variable, `None` for any other rank.
fn grid_shape(var: &netcdf::Variable) -> Option<(usize, usize)> {
    match var.dimensions() {
        [rows, cols] => Some((rows.len(), cols.len())),
        _ => None,
    }
}

/// Read a whole 2-D variable, masking fill values and applying scale/offset.
fn read_grid(var: &netcdf::Variable, (rows, cols): (usize, usize)) -> SwathResult<Grid2D> {
    let raw: Vec<f64> = var
        .get_values(..)
        .map_err(|e| SwathError::InvalidFormat(format!("Failed to read {}: {}", var.name(), e)))?;

    let fill_value = get_f64_attr(var, "_FillValue");
    let scale_factor = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);

    let data = raw
        .into_iter()
        .map(|val| match fill_value {
            Some(fill) if val == fill => f64::NAN,
            _ => val * scale_factor + add_offset,
        })
        .collect();

    Grid2D::new(rows, cols, data)
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a numeric attribute as f64.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
