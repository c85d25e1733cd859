use std::fmt;

use ndarray::{Array1, Array2};

// ---------------------------------------------------------------------------
// AttrValue – a single root attribute of the container
// ---------------------------------------------------------------------------

/// A dynamically-typed scalar attribute as stored in the container root.
/// Values pass through with their native type; formatting happens only
/// at the display boundary via `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Integer(i) => write!(f, "{i}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RootAttributes – acquisition metadata
// ---------------------------------------------------------------------------

/// Root-level attributes of a container file, in the order the container
/// lists them. Loaded once per file, read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct RootAttributes {
    entries: Vec<(String, AttrValue)>,
}

impl RootAttributes {
    pub fn new(entries: Vec<(String, AttrValue)>) -> Self {
        Self { entries }
    }

    /// Ordered key → value listing for the attribute table.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ChannelStore – the raw waterfalls of the current file
// ---------------------------------------------------------------------------

/// The two acquisition channels of a DAS recording. Channel A drives all
/// derivations; channel B is kept for the raw-trace overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    A,
    B,
}

/// Holds the most recently loaded channel waterfalls. Rows are time
/// frames in acquisition order, columns are distance bins. Pure data
/// holder: replaced wholesale on each load, never mutated in place.
#[derive(Debug, Default)]
pub struct ChannelStore {
    channel_a: Option<Array2<f32>>,
    channel_b: Option<Array2<f32>>,
}

impl ChannelStore {
    /// Replace both channels at once. Callers never observe one channel
    /// from the old file next to one from the new.
    pub fn set_channels(&mut self, a: Array2<f32>, b: Option<Array2<f32>>) {
        self.channel_a = Some(a);
        self.channel_b = b;
    }

    pub fn get(&self, channel: Channel) -> Option<&Array2<f32>> {
        match channel {
            Channel::A => self.channel_a.as_ref(),
            Channel::B => self.channel_b.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// DerivedViews – recomputed on every Process request
// ---------------------------------------------------------------------------

/// Arrays derived from the current channel A waterfall. Discarded and
/// rebuilt together, so they can never disagree about their source.
#[derive(Debug)]
pub struct DerivedViews {
    /// One-sided PSD per distance bin; rows are frequency bins.
    pub psd: Array2<f32>,
    /// Population variance per distance bin.
    pub variance: Array1<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn store_replaces_both_channels() {
        let mut store = ChannelStore::default();
        store.set_channels(arr2(&[[1.0f32, 2.0]]), Some(arr2(&[[3.0f32, 4.0]])));
        assert!(store.get(Channel::A).is_some());
        assert!(store.get(Channel::B).is_some());

        // A reload without channel B must drop the stale B as well.
        store.set_channels(arr2(&[[5.0f32]]), None);
        assert_eq!(store.get(Channel::A).unwrap()[[0, 0]], 5.0);
        assert!(store.get(Channel::B).is_none());
    }

    #[test]
    fn missing_channel_b_leaves_a_usable() {
        let mut store = ChannelStore::default();
        store.set_channels(arr2(&[[1.0f32, 2.0], [3.0, 4.0]]), None);
        let a = store.get(Channel::A).expect("channel A present");
        assert_eq!(a.dim(), (2, 2));
        assert!(store.get(Channel::B).is_none());
    }

    #[test]
    fn attr_value_display_passes_values_through() {
        assert_eq!(AttrValue::Integer(100).to_string(), "100");
        assert_eq!(AttrValue::Float(10.5).to_string(), "10.5");
        assert_eq!(AttrValue::Text("IITM DAS".into()).to_string(), "IITM DAS");
    }

    #[test]
    fn root_attributes_preserve_order() {
        let attrs = RootAttributes::new(vec![
            ("Trig_PRF(Hz)".into(), AttrValue::Integer(100)),
            ("Fiber_len(m)".into(), AttrValue::Float(1000.0)),
        ]);
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Trig_PRF(Hz)", "Fiber_len(m)"]);
        assert_eq!(attrs.get("Fiber_len(m)"), Some(&AttrValue::Float(1000.0)));
        assert_eq!(attrs.get("missing"), None);
    }
}
