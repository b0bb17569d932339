use std::collections::HashMap;

use crate::error::{Error, Result};

use super::cpu::CpuParser;
use super::parser::PluginParser;
use super::psutil::PsutilParser;

/// Owns the set of plugin parsers and dispatches metric names to them.
/// Built once at startup; read-only during message processing.
///
/// Dispatch is two-tier: an exact-name map first, then a scan over the
/// parsers in registration order asking each `matches`. The scan order
/// is deterministic and ties go to the first-registered parser.
pub struct ParserRegistry {
    exact: HashMap<String, usize>,
    parsers: Vec<Box<dyn PluginParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            parsers: Vec::new(),
        }
    }

    /// The deployment's parser set: psutil (exact names) first, then
    /// the per-cpu collector (parameterized names).
    pub fn with_default_plugins() -> Self {
        let mut registry = Self::new();

        let psutil = PsutilParser::new();
        let names: Vec<&str> = psutil.known_names().collect();
        registry.register(Box::new(psutil), &names);

        registry.register(Box::new(CpuParser::new()), &[]);
        registry
    }

    pub fn register(&mut self, parser: Box<dyn PluginParser>, exact_names: &[&str]) {
        let idx = self.parsers.len();
        self.parsers.push(parser);
        for name in exact_names {
            self.exact.insert((*name).to_string(), idx);
        }
    }

    pub fn resolve(&self, metric_name: &str) -> Result<&dyn PluginParser> {
        // 1st pass: exact names straight out of the map.
        if let Some(&idx) = self.exact.get(metric_name) {
            return Ok(self.parsers[idx].as_ref());
        }

        // 2nd pass: ask every parser about parameterized names.
        for parser in self.parsers.iter() {
            if parser.matches(metric_name) {
                return Ok(parser.as_ref());
            }
        }

        Err(Error::NoParserFound(metric_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::Value;

    use crate::model::FieldSet;

    struct ProbeParser {
        matches_any: bool,
        tag: &'static str,
        matches_called: Rc<Cell<bool>>,
        decode_called: Rc<Cell<bool>>,
    }

    impl ProbeParser {
        fn new(matches_any: bool, tag: &'static str) -> Self {
            Self {
                matches_any,
                tag,
                matches_called: Rc::new(Cell::new(false)),
                decode_called: Rc::new(Cell::new(false)),
            }
        }
    }

    impl PluginParser for ProbeParser {
        fn matches(&self, _metric_name: &str) -> bool {
            self.matches_called.set(true);
            self.matches_any
        }

        fn decode_fields(&self, _metric_name: &str, _payload: &Value) -> crate::error::Result<FieldSet> {
            self.decode_called.set(true);
            let mut fields = FieldSet::new();
            fields.insert("probe".into(), crate::model::FieldValue::Text(self.tag.into()));
            Ok(fields)
        }
    }

    #[test]
    fn test_exact_match_short_circuits_scan() {
        let probe = ProbeParser::new(true, "a");
        let matches_called = Rc::clone(&probe.matches_called);

        let mut registry = ParserRegistry::new();
        registry.register(Box::new(probe), &["known/metric"]);

        registry.resolve("known/metric").unwrap();
        assert!(
            !matches_called.get(),
            "exact-name resolution must not invoke any matches predicate"
        );
    }

    #[test]
    fn test_scan_first_registered_wins() -> crate::error::Result<()> {
        let first = ProbeParser::new(true, "first");
        let second = ProbeParser::new(true, "second");
        let second_matches = Rc::clone(&second.matches_called);

        let mut registry = ParserRegistry::new();
        registry.register(Box::new(first), &[]);
        registry.register(Box::new(second), &[]);

        let parser = registry.resolve("anything/at/all")?;
        let fields = parser.decode_fields("anything/at/all", &Value::Null)?;
        assert_eq!(
            fields.get("probe"),
            Some(&crate::model::FieldValue::Text("first".into()))
        );
        assert!(!second_matches.get());
        Ok(())
    }

    #[test]
    fn test_no_parser_found() {
        let probe = ProbeParser::new(false, "a");
        let decode_called = Rc::clone(&probe.decode_called);

        let mut registry = ParserRegistry::new();
        registry.register(Box::new(probe), &["known/metric"]);

        match registry.resolve("unknown/metric") {
            Err(Error::NoParserFound(name)) => assert_eq!(name, "unknown/metric"),
            other => panic!("expected NoParserFound, got {:?}", other.map(|_| ())),
        }
        assert!(!decode_called.get());
    }

    #[test]
    fn test_default_plugins_cover_both_tiers() {
        let registry = ParserRegistry::with_default_plugins();
        assert!(registry.resolve("intel/psutil/cpu/percent").is_ok());
        assert!(registry.resolve("intel/procfs/cpu/0/user_percentage").is_ok());
        assert!(registry.resolve("intel/psutil/no/such/metric").is_err());
    }
}
