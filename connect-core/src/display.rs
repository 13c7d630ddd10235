//! Debug-string rendering for shapes
//!
//! A shape renders as `{Field: value,Field: value}`, naming only the fields
//! that are set, in declaration order. Field values render through
//! [`FieldDisplay`] so lists, maps and nested shapes nest naturally.

use std::collections::BTreeMap;
use std::fmt;

/// How a field value appears inside a shape's debug string.
pub trait FieldDisplay {
    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl FieldDisplay for String {
    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl FieldDisplay for crate::value::Sensitive {
    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::value::REDACTED)
    }
}

macro_rules! impl_field_display_via_display {
    ($($t:ty),*) => {
        $(
            impl FieldDisplay for $t {
                fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

impl_field_display_via_display!(
    bool,
    i32,
    i64,
    crate::value::Double,
    crate::value::Timestamp
);

impl<T: FieldDisplay> FieldDisplay for Vec<T> {
    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            item.fmt_field(f)?;
        }
        f.write_str("]")
    }
}

impl<V: FieldDisplay> FieldDisplay for BTreeMap<String, V> {
    fn fmt_field(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key)?;
            f.write_str("=")?;
            value.fmt_field(f)?;
        }
        f.write_str("}")
    }
}

/// Writer used by generated `Display` impls.
pub struct ShapeWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    wrote_any: bool,
}

impl<'a, 'b> ShapeWriter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Result<Self, fmt::Error> {
        f.write_str("{")?;
        Ok(Self {
            f,
            wrote_any: false,
        })
    }

    /// Writes `Name: value` when the field is set; unset fields are skipped.
    pub fn field<T: FieldDisplay>(&mut self, name: &str, value: &Option<T>) -> fmt::Result {
        let Some(value) = value else {
            return Ok(());
        };
        if self.wrote_any {
            self.f.write_str(",")?;
        }
        self.wrote_any = true;
        self.f.write_str(name)?;
        self.f.write_str(": ")?;
        value.fmt_field(self.f)
    }

    pub fn finish(self) -> fmt::Result {
        self.f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fields {
        name: Option<String>,
        count: Option<i32>,
        items: Option<Vec<String>>,
        labels: Option<BTreeMap<String, String>>,
    }

    impl fmt::Display for Fields {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut out = ShapeWriter::new(f)?;
            out.field("Name", &self.name)?;
            out.field("Count", &self.count)?;
            out.field("Items", &self.items)?;
            out.field("Labels", &self.labels)?;
            out.finish()
        }
    }

    #[test]
    fn test_empty_shape_renders_braces() {
        let fields = Fields {
            name: None,
            count: None,
            items: None,
            labels: None,
        };
        assert_eq!(fields.to_string(), "{}");
    }

    #[test]
    fn test_skips_unset_fields_without_dangling_commas() {
        let fields = Fields {
            name: None,
            count: Some(3),
            items: Some(vec!["a".to_string(), "b".to_string()]),
            labels: None,
        };
        assert_eq!(fields.to_string(), "{Count: 3,Items: [a, b]}");
    }

    #[test]
    fn test_map_renders_sorted_entries() {
        let mut labels = BTreeMap::new();
        labels.insert("z".to_string(), "last".to_string());
        labels.insert("a".to_string(), "first".to_string());
        let fields = Fields {
            name: Some("n".to_string()),
            count: None,
            items: None,
            labels: Some(labels),
        };
        assert_eq!(fields.to_string(), "{Name: n,Labels: {a=first, z=last}}");
    }
}
