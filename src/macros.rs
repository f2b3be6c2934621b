/// Builds a [`StructuredRecord`](crate::StructuredRecord) from `"Field" => value` pairs.
///
/// Values go through `Into<FieldValue>`, so numbers stay unquoted and strings
/// are quoted when serialized. Field order is the order written.
///
/// ```rust
/// use asa_ini::{record, FieldValue};
///
/// let item = record! {
///     "ItemClassString" => "PrimalItemResource_Stone_C",
///     "Quantity" => FieldValue::Nested("(MaxItemQuantity=100,bIgnoreMultiplier=true)".to_string()),
/// };
/// assert_eq!(item.field_names(), vec!["ItemClassString", "Quantity"]);
/// assert!(record!().is_empty());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::StructuredRecord::new()
    };

    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::StructuredRecord::new()
            $(.with_field($name, $value))+
    };
}

#[cfg(test)]
mod tests {
    use crate::{serialize_records, FieldValue, StructuredRecord};

    #[test]
    fn test_record_macro_empty() {
        assert_eq!(record!(), StructuredRecord::new());
    }

    #[test]
    fn test_record_macro_matches_builder() {
        let built = StructuredRecord::new()
            .with_field("ClassName", "Dino_C")
            .with_field("Multiplier", 2.0);
        let from_macro = record! { "ClassName" => "Dino_C", "Multiplier" => 2.0 };
        assert_eq!(from_macro, built);
    }

    #[test]
    fn test_record_macro_mixed_values() {
        let name = String::from("Rex_C");
        let r = record! {
            "ClassName" => name,
            "Count" => 3,
            "Flag" => FieldValue::Text("true".to_string()),
        };
        assert_eq!(serialize_records(&[r]), r#"(ClassName="Rex_C",Count=3,Flag="true")"#);
    }
}
