//! Classification of values into node kinds and display text

use chrono::{FixedOffset, Offset, Utc};
use log::trace;
use std::rc::Rc;

use crate::tree::config::TreeConfig;
use crate::tree::date::DatePattern;
use crate::tree::label::mentions_date;
use crate::tree::node::NodeKind;
use crate::tree::value::{format_number, Value};

/// Result of classifying a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: NodeKind,
    /// Text for leaves and empty containers, `None` for containers
    pub display: Option<String>,
}

/// Leaves shown with the empty label: undefined, null and `""`
///
/// `false`, `0` and `NaN` are not blank.
pub fn is_blank_leaf(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Arrays and objects without a single enumerable member
pub fn is_empty_container(value: &Value) -> bool {
    value.is_container() && value.member_count() == 0
}

/// Decide the kind of a value and the text it is displayed with
pub fn classify(value: &Value, config: &TreeConfig) -> Classification {
    if value.is_container() {
        return if is_empty_container(value) {
            Classification {
                kind: NodeKind::EmptyContainer,
                display: Some(config.empty_label.clone()),
            }
        } else {
            Classification {
                kind: NodeKind::Container,
                display: None,
            }
        };
    }

    let display = if is_blank_leaf(value) {
        config.empty_label.clone()
    } else {
        match value {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            // Functions only surface as a root value and have no text
            _ => config.empty_label.clone(),
        }
    };
    Classification {
        kind: NodeKind::Leaf,
        display: Some(display),
    }
}

/// Classifies the values of one tree, applying the date label convention
///
/// Counts every call so callers can verify that children are only
/// classified when they are materialized.
#[derive(Debug)]
pub struct Classifier {
    config: Rc<TreeConfig>,
    dates: DatePattern,
    offset: FixedOffset,
    calls: usize,
}

impl Classifier {
    pub fn new(config: Rc<TreeConfig>) -> Self {
        let dates = DatePattern::parse(&config.date_format);
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self {
            config,
            dates,
            offset,
            calls: 0,
        }
    }

    /// Classify the value found under `label`
    ///
    /// A numeric leaf whose label contains "Date" is displayed as a date;
    /// anything else under such a label is left as it is.
    pub fn classify(&mut self, label: &str, value: &Value) -> Classification {
        self.calls += 1;
        let mut classification = classify(value, &self.config);
        if classification.kind == NodeKind::Leaf && mentions_date(label) {
            if let Some(text) = value
                .as_epoch_millis()
                .and_then(|millis| self.dates.format_millis(millis, self.offset))
            {
                trace!("Formatted '{}' as date {}", label, text);
                classification.display = Some(text);
            }
        }
        classification
    }

    /// Number of values classified so far
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn config(&self) -> &Rc<TreeConfig> {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_text(value: Value) -> String {
        let classification = classify(&value, &TreeConfig::default());
        assert_eq!(classification.kind, NodeKind::Leaf);
        classification.display.unwrap()
    }

    #[test]
    fn test_containers() {
        let config = TreeConfig::default();
        let full = Value::object([("a", Value::from(1))]);
        assert_eq!(classify(&full, &config).kind, NodeKind::Container);
        assert_eq!(classify(&full, &config).display, None);

        let list = Value::array([Value::Null]);
        assert_eq!(classify(&list, &config).kind, NodeKind::Container);
    }

    #[test]
    fn test_empty_containers() {
        let config = TreeConfig::default().with_empty_label("-");
        for value in [
            Value::array([]),
            Value::object(Vec::<(String, Value)>::new()),
            Value::object([("callback", Value::function("f"))]),
            Value::array([Value::function("f")]),
        ] {
            assert!(is_empty_container(&value));
            let classification = classify(&value, &config);
            assert_eq!(classification.kind, NodeKind::EmptyContainer);
            assert_eq!(classification.display.as_deref(), Some("-"));
        }
    }

    #[test]
    fn test_leaves() {
        assert_eq!(leaf_text(Value::from("hello")), "hello");
        assert_eq!(leaf_text(Value::from(8)), "8");
        assert_eq!(leaf_text(Value::from(2.5)), "2.5");
        assert_eq!(leaf_text(Value::from(true)), "true");
        assert_eq!(leaf_text(Value::from(false)), "false");
        assert_eq!(leaf_text(Value::from(0)), "0");
        assert_eq!(leaf_text(Value::from(f64::NAN)), "NaN");
    }

    #[test]
    fn test_blank_leaves() {
        assert!(is_blank_leaf(&Value::Undefined));
        assert!(is_blank_leaf(&Value::Null));
        assert!(is_blank_leaf(&Value::from("")));
        assert!(!is_blank_leaf(&Value::from(" ")));
        assert!(!is_blank_leaf(&Value::from(0)));
        assert!(!is_blank_leaf(&Value::from(false)));
        assert!(!is_blank_leaf(&Value::array([])));

        assert_eq!(leaf_text(Value::Null), "none");
        assert_eq!(leaf_text(Value::from("")), "none");
        assert_eq!(leaf_text(Value::function("main")), "none");
    }

    #[test]
    fn test_date_label() {
        let mut classifier = Classifier::new(Rc::new(TreeConfig::default()));
        let formatted = classifier.classify("With Date", &Value::from(1505296820331i64));
        assert_eq!(formatted.display.as_deref(), Some("2017-09-13 10:00:20"));

        let from_text = classifier.classify("Start Date", &Value::from("1505296820331"));
        assert_eq!(from_text.display.as_deref(), Some("2017-09-13 10:00:20"));

        let not_numeric = classifier.classify("With Date", &Value::from("tomorrow"));
        assert_eq!(not_numeric.display.as_deref(), Some("tomorrow"));

        for text in ["1.5", "1e12", " 42 ", "+5"] {
            let kept = classifier.classify("With Date", &Value::from(text));
            assert_eq!(kept.display.as_deref(), Some(text));
        }

        let blank = classifier.classify("With Date", &Value::from(""));
        assert_eq!(blank.display.as_deref(), Some("none"));

        let plain = classifier.classify("Count", &Value::from(1505296820331i64));
        assert_eq!(plain.display.as_deref(), Some("1505296820331"));

        assert_eq!(classifier.calls(), 9);
    }

    #[test]
    fn test_date_label_with_offset_and_format() {
        let config = TreeConfig::default()
            .with_date_format("dd/MM/yyyy HH:mm")
            .with_utc_offset_minutes(-300);
        let mut classifier = Classifier::new(Rc::new(config));
        let formatted = classifier.classify("Date", &Value::from(1505296820331i64));
        assert_eq!(formatted.display.as_deref(), Some("13/09/2017 05:00"));
    }

    #[test]
    fn test_date_label_ignores_containers() {
        let mut classifier = Classifier::new(Rc::new(TreeConfig::default()));
        let classification = classifier.classify("Dates", &Value::array([Value::from(1)]));
        assert_eq!(classification.kind, NodeKind::Container);
        assert_eq!(classification.display, None);
    }
}
