use std::path::PathBuf;

use anyhow::{Context, Result};
use hdf5::types::{FloatSize, IntSize, TypeDescriptor, VarLenAscii, VarLenUnicode};
use ndarray::Array2;

use super::model::{AttrValue, RootAttributes};

// ---------------------------------------------------------------------------
// ContainerReader – scoped access to a tagged container file
// ---------------------------------------------------------------------------

/// Reads named 2-D datasets and root attributes from an HDF5 container.
///
/// Every call opens the file, reads, and closes it again; no handle is
/// held between operations, so a reader can outlive any number of
/// loads without pinning the file.
pub struct ContainerReader {
    path: PathBuf,
}

impl ContainerReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read a root-level 2-D dataset by name. `Ok(None)` when the name
    /// is absent — callers treat that as "no data", not as a failure.
    pub fn read_dataset(&self, name: &str) -> Result<Option<Array2<f32>>> {
        let file = hdf5::File::open(&self.path)
            .with_context(|| format!("opening container {}", self.path.display()))?;

        if !file.link_exists(name) {
            return Ok(None);
        }

        let dataset = file
            .dataset(name)
            .with_context(|| format!("opening dataset '{name}'"))?;
        let array = dataset
            .read_2d::<f32>()
            .with_context(|| format!("reading dataset '{name}' as a 2-D float array"))?;

        Ok(Some(array))
    }

    /// Read all root-level scalar attributes, preserving the order the
    /// container lists them in. Attributes with types that have no
    /// scalar mapping are skipped with a warning.
    pub fn read_root_attributes(&self) -> Result<RootAttributes> {
        let file = hdf5::File::open(&self.path)
            .with_context(|| format!("opening container {}", self.path.display()))?;

        let mut entries = Vec::new();
        for name in file.attr_names().context("listing root attributes")? {
            let attr = file
                .attr(&name)
                .with_context(|| format!("opening attribute '{name}'"))?;
            match read_scalar_attr(&attr) {
                Ok(Some(value)) => entries.push((name, value)),
                Ok(None) => log::warn!("skipping attribute '{name}' with unsupported type"),
                Err(e) => log::warn!("failed to read attribute '{name}': {e:#}"),
            }
        }

        Ok(RootAttributes::new(entries))
    }
}

// -- Attribute type dispatch --

/// Map an attribute's stored type onto the tagged scalar variant.
fn read_scalar_attr(attr: &hdf5::Attribute) -> Result<Option<AttrValue>> {
    let descriptor = attr.dtype()?.to_descriptor()?;

    let value = match descriptor {
        TypeDescriptor::Integer(size) => {
            let v = match size {
                IntSize::U1 => attr.read_scalar::<i8>()? as i64,
                IntSize::U2 => attr.read_scalar::<i16>()? as i64,
                IntSize::U4 => attr.read_scalar::<i32>()? as i64,
                IntSize::U8 => attr.read_scalar::<i64>()?,
            };
            AttrValue::Integer(v)
        }
        TypeDescriptor::Unsigned(size) => {
            let v = match size {
                IntSize::U1 => attr.read_scalar::<u8>()? as i64,
                IntSize::U2 => attr.read_scalar::<u16>()? as i64,
                IntSize::U4 => attr.read_scalar::<u32>()? as i64,
                IntSize::U8 => attr.read_scalar::<u64>()? as i64,
            };
            AttrValue::Integer(v)
        }
        TypeDescriptor::Float(size) => {
            let v = match size {
                FloatSize::U8 => attr.read_scalar::<f64>()?,
                _ => attr.read_scalar::<f32>()? as f64,
            };
            AttrValue::Float(v)
        }
        TypeDescriptor::Boolean => AttrValue::Integer(attr.read_scalar::<bool>()? as i64),
        TypeDescriptor::VarLenAscii => {
            AttrValue::Text(attr.read_scalar::<VarLenAscii>()?.as_str().to_owned())
        }
        TypeDescriptor::VarLenUnicode
        | TypeDescriptor::FixedAscii(_)
        | TypeDescriptor::FixedUnicode(_) => {
            AttrValue::Text(attr.read_scalar::<VarLenUnicode>()?.as_str().to_owned())
        }
        _ => return Ok(None),
    };

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    /// Temp container that cleans up after itself.
    struct TempContainer {
        path: PathBuf,
    }

    impl TempContainer {
        fn create(tag: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "das_scope_test_{tag}_{}.h5",
                std::process::id()
            ));
            Self { path }
        }
    }

    impl Drop for TempContainer {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    #[test]
    fn attribute_round_trip_preserves_keys_and_types() {
        let tmp = TempContainer::create("attrs");
        {
            let file = hdf5::File::create(&tmp.path).unwrap();
            file.new_attr::<i64>()
                .create("Trig_PRF(Hz)")
                .unwrap()
                .write_scalar(&100i64)
                .unwrap();
            file.new_attr::<i64>()
                .create("Capture_duration(s)")
                .unwrap()
                .write_scalar(&50i64)
                .unwrap();
            file.new_attr::<VarLenUnicode>()
                .create("DAS hardware")
                .unwrap()
                .write_scalar(&"X".parse::<VarLenUnicode>().unwrap())
                .unwrap();
        }

        let reader = ContainerReader::new(&tmp.path);
        let attrs = reader.read_root_attributes().unwrap();

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("Trig_PRF(Hz)"), Some(&AttrValue::Integer(100)));
        assert_eq!(
            attrs.get("Capture_duration(s)"),
            Some(&AttrValue::Integer(50))
        );
        assert_eq!(
            attrs.get("DAS hardware"),
            Some(&AttrValue::Text("X".into()))
        );
    }

    #[test]
    fn missing_dataset_is_none_not_error() {
        let tmp = TempContainer::create("missing");
        {
            let file = hdf5::File::create(&tmp.path).unwrap();
            file.new_dataset_builder()
                .with_data(&arr2(&[[1.0f32, 2.0], [3.0, 4.0]]))
                .create("Ch_A")
                .unwrap();
        }

        let reader = ContainerReader::new(&tmp.path);
        let a = reader.read_dataset("Ch_A").unwrap();
        assert_eq!(a.unwrap().dim(), (2, 2));

        let b = reader.read_dataset("Ch_B").unwrap();
        assert!(b.is_none());
    }

    #[test]
    fn dataset_values_survive_the_round_trip() {
        let tmp = TempContainer::create("values");
        let written = arr2(&[[0.5f32, -1.5, 2.0], [3.25, 4.0, -0.125]]);
        {
            let file = hdf5::File::create(&tmp.path).unwrap();
            file.new_dataset_builder()
                .with_data(&written)
                .create("Ch_A")
                .unwrap();
        }

        let reader = ContainerReader::new(&tmp.path);
        let read = reader.read_dataset("Ch_A").unwrap().unwrap();
        assert_eq!(read, written);
    }
}
