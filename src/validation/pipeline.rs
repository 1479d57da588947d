//! Validation pipeline implementation.

use crate::core::context::ValidatorContext;
use crate::core::error::{FieldError, TagcheckResult, ValidationError, ValidationReport};
use crate::core::record::{Record, RecordField, Reflect};
use crate::core::types::FieldValue;
use crate::validation::normalize::normalize;
use crate::validation::options::PipelineOptions;
use crate::validators::registry::{self, ValidatorFn, ValidatorRegistry};
use crate::walker::{walk, walk_into, Field, FieldArena, FieldId};
use log::{debug, trace};
use std::path::Path;
use std::sync::Arc;

/// Record name used by [`ValidationPipeline::check`].
pub const ANONYMOUS_RECORD: &str = "Value";

/// Runs every field's directive chain against a sealed registry.
///
/// Value failures are collected per field into a [`ValidationReport`].
/// Configuration problems (bad tags, unknown validators, bad arguments) and
/// unsupported value kinds abort the pass with a [`ValidationError`].
pub struct ValidationPipeline {
    registry: Arc<ValidatorRegistry>,
    options: PipelineOptions,
}

impl ValidationPipeline {
    /// Create a pipeline over the given registry.
    pub fn new(registry: Arc<ValidatorRegistry>, options: PipelineOptions) -> Self {
        Self { registry, options }
    }

    /// Create a pipeline over the process-wide registry.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self::new(registry::global(), options)
    }

    /// Create a pipeline over the process-wide registry with options loaded
    /// from a TOML file.
    pub fn from_config_file(path: impl AsRef<Path>) -> TagcheckResult<Self> {
        let options = PipelineOptions::from_file(path)?;
        debug!("loaded pipeline options: {:?}", options);
        Ok(Self::with_options(options))
    }

    /// The pipeline's options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// The registry validators are looked up in.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Validate a record.
    pub fn validate<R: Reflect + ?Sized>(&self, record: &R) -> Result<ValidationReport, ValidationError> {
        let record_name = record.record_name().to_string();
        debug!("validating '{}' with tag key '{}'", record_name, self.options.tag_key);

        let mut arena = walk(record, &self.options.tag_key)?;
        let mut report = ValidationReport::new(record_name.as_str());

        let roots = arena.roots();
        self.validate_fields(&mut arena, roots, &record_name, &mut report)?;

        debug!(
            "'{}': {} field(s) checked, {} failed",
            record_name,
            report.fields_checked,
            report.errors.len()
        );
        Ok(report)
    }

    /// Validate a single value against tag text.
    ///
    /// The value is wrapped in a one-field record named
    /// [`ANONYMOUS_RECORD`] whose field is called `field`.
    pub fn check(
        &self,
        field: &str,
        tag: &str,
        value: impl Into<FieldValue>,
    ) -> Result<ValidationReport, ValidationError> {
        let record = Record::builder(ANONYMOUS_RECORD)
            .field(RecordField::new(field, value).tag(self.options.tag_key.as_str(), tag))
            .build();
        self.validate(&record)
    }

    fn validate_fields(
        &self,
        arena: &mut FieldArena,
        ids: Vec<FieldId>,
        record_name: &str,
        report: &mut ValidationReport,
    ) -> Result<(), ValidationError> {
        for id in ids {
            if self.options.fail_fast && !report.is_valid() {
                return Ok(());
            }

            self.run_chain(arena, id, record_name, report)?;

            if self.options.recurse {
                self.descend(arena, id, record_name, report)?;
            }
        }
        Ok(())
    }

    /// Run one field's directives against a single shared context.
    fn run_chain(
        &self,
        arena: &FieldArena,
        id: FieldId,
        record_name: &str,
        report: &mut ValidationReport,
    ) -> Result<(), ValidationError> {
        let field = &arena[id];
        if field.directives.is_empty() {
            return Ok(());
        }

        let path = arena.path(id);
        let chain = self.resolve(field, record_name, &path)?;
        let mut ctx = ValidatorContext::new(normalize(&field.value));
        report.fields_checked += 1;

        for (directive, validator) in field.directives.iter().zip(chain) {
            trace!("{}.{}: running '{}'", record_name, path, directive);

            match validator(&mut ctx, &directive.options) {
                Ok(()) if ctx.is_stopped() => {
                    trace!("{}.{}: chain stopped by '{}'", record_name, path, directive.name);
                    break;
                }
                Ok(()) => {}
                Err(error) if error.is_fatal() => {
                    return Err(ValidationError::Validator {
                        record: record_name.to_string(),
                        field: path.clone(),
                        validator: directive.name.clone(),
                        message: error.render(record_name, &path),
                        source: error,
                    });
                }
                Err(error) => {
                    report.add_error(FieldError {
                        field: path.clone(),
                        validator: directive.name.clone(),
                        message: error.render(record_name, &path),
                    });
                    break;
                }
            }
        }

        Ok(())
    }

    /// Look up every validator in the chain before running any of them.
    fn resolve(
        &self,
        field: &Field,
        record_name: &str,
        path: &str,
    ) -> Result<Vec<ValidatorFn>, ValidationError> {
        field
            .directives
            .iter()
            .map(|directive| {
                self.registry
                    .lookup(&directive.name)
                    .cloned()
                    .ok_or_else(|| ValidationError::UnknownValidator {
                        validator: directive.name.clone(),
                        record: record_name.to_string(),
                        field: path.to_string(),
                    })
            })
            .collect()
    }

    /// Walk nested records (directly or inside a list) under this field.
    fn descend(
        &self,
        arena: &mut FieldArena,
        id: FieldId,
        record_name: &str,
        report: &mut ValidationReport,
    ) -> Result<(), ValidationError> {
        let value = &arena[id].value;
        if value.is_nil() {
            return Ok(());
        }

        let nested: Vec<(Option<usize>, Record)> = match (value.as_record(), value.as_list()) {
            (Some(record), _) => vec![(None, record.clone())],
            (None, Some(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| item.as_record().map(|r| (Some(i), r.clone())))
                .collect(),
            (None, None) => Vec::new(),
        };

        for (index, record) in nested {
            let parent = match index {
                Some(i) => arena.push(
                    Field::new(i.to_string(), FieldValue::Record(record.clone()), Vec::new())
                        .with_parent(id),
                ),
                None => id,
            };

            let children = walk_into(arena, Some(parent), &record, &self.options.tag_key)?;
            self.validate_fields(arena, children, record_name, report)?;
        }

        Ok(())
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::with_options(PipelineOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{
        ConfigError, ErrorCategory, TagParseError, TagcheckError, ValidatorError,
    };
    use crate::core::types::{Value, ValueKind};
    use crate::validators::registry::RegistryBuilder;
    use proptest::prelude::*;

    fn pipeline() -> ValidationPipeline {
        let registry = RegistryBuilder::new().build().unwrap();
        ValidationPipeline::new(Arc::new(registry), PipelineOptions::default())
    }

    fn user(name: &str, age: Option<i64>, zip: &str) -> Record {
        let address = Record::builder("Address")
            .tagged("Zip", "validate", "numeric,min:1000,max:99999", zip)
            .build();

        Record::builder("User")
            .tagged("Name", "validate", "not_empty,min:2,max:16,lowercase", name)
            .tagged("Age", "validate", "empty,min:18", age)
            .field(RecordField::private("password", "hunter2").tag("validate", "uppercase"))
            .field(RecordField::new("Address", address))
            .build()
    }

    #[test]
    fn test_valid_record() {
        let report = pipeline().validate(&user("ann", Some(30), "12345")).unwrap();
        assert!(report.is_valid(), "{:?}", report.errors);
        assert_eq!(report.record, "User");
        assert_eq!(report.fields_checked, 3);
    }

    #[test]
    fn test_value_failures_are_collected() {
        let report = pipeline().validate(&user("A", Some(12), "12a")).unwrap();

        assert_eq!(report.errors.len(), 3);
        assert_eq!(
            report.get("Name").map(|e| e.message.as_str()),
            Some("Name cannot be shorter than 2 characters.")
        );
        assert_eq!(
            report.get("Age").map(|e| e.message.as_str()),
            Some("Age cannot be less than 18.")
        );
        assert_eq!(
            report.get("Address.Zip").map(|e| e.message.as_str()),
            Some("Address.Zip must contain numbers only.")
        );
        assert_eq!(report.get("Address.Zip").unwrap().validator, "numeric");
    }

    #[test]
    fn test_empty_stops_chain() {
        let report = pipeline().validate(&user("ann", None, "12345")).unwrap();
        assert!(report.get("Age").is_none());
    }

    #[test]
    fn test_numeric_coercion_feeds_bounds() {
        let report = pipeline().validate(&user("ann", None, "123")).unwrap();
        assert_eq!(
            report.get("Address.Zip").map(|e| e.message.as_str()),
            Some("Address.Zip cannot be less than 1000.")
        );
    }

    #[test]
    fn test_unknown_validator_aborts() {
        let record = Record::builder("User")
            .tagged("Name", "validate", "not_empty,shiny", "ann")
            .build();

        assert_eq!(
            pipeline().validate(&record).unwrap_err(),
            ValidationError::UnknownValidator {
                validator: "shiny".into(),
                record: "User".into(),
                field: "Name".into(),
            }
        );
    }

    #[test]
    fn test_unknown_validator_after_stop_still_aborts() {
        let record = Record::builder("User")
            .tagged("Nick", "validate", "empty,shiny", "")
            .build();
        assert!(matches!(
            pipeline().validate(&record),
            Err(ValidationError::UnknownValidator { .. })
        ));
    }

    #[test]
    fn test_unsupported_type_aborts_with_identity() {
        let record = Record::builder("Flags")
            .tagged("Enabled", "validate", "min:1", true)
            .build();

        let error = pipeline().validate(&record).unwrap_err();
        assert_eq!(error.category(), ErrorCategory::UnsupportedType);
        assert_eq!(
            error.to_string(),
            "Validator with name 'min' on struct 'Flags' and field 'Enabled' is not supported."
        );
    }

    #[test]
    fn test_argument_error_aborts() {
        let record = Record::builder("User")
            .tagged("Name", "validate", "min:x", "ann")
            .build();

        match pipeline().validate(&record) {
            Err(ValidationError::Validator { source, field, .. }) => {
                assert_eq!(field, "Name");
                assert_eq!(source, ValidatorError::unparsable("min", "x"));
            }
            other => panic!("expected argument error, got {:?}", other),
        }
    }

    #[test]
    fn test_tag_parse_error_aborts() {
        let record = Record::builder("User")
            .tagged("Name", "validate", "not_empty,,", "ann")
            .build();

        assert!(matches!(
            pipeline().validate(&record),
            Err(ValidationError::TagParse {
                source: TagParseError::EmptyDirective { position: 2 },
                ..
            })
        ));
    }

    #[test]
    fn test_nested_tag_error_reports_full_path() {
        let inner = Record::builder("Address")
            .tagged("Zip", "validate", ":5", "1")
            .build();
        let record = Record::builder("User")
            .field(RecordField::new("Home", inner))
            .build();

        assert_eq!(pipeline().validate(&record).unwrap_err().field(), "Home.Zip");
    }

    #[test]
    fn test_list_elements_get_index_paths() {
        let item = |sku: &str| {
            Record::builder("Item")
                .tagged("Sku", "validate", "uppercase", sku)
                .build()
        };
        let order = Record::builder("Order")
            .field(RecordField::new(
                "Items",
                FieldValue::List(vec![
                    FieldValue::Record(item("AB-1")),
                    FieldValue::Record(item("cd-2")),
                ]),
            ))
            .build();

        let report = pipeline().validate(&order).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.get("Items.1.Sku").map(|e| e.message.as_str()),
            Some("Items.1.Sku must be in upper case.")
        );
    }

    #[test]
    fn test_nil_record_is_not_descended() {
        let record = Record::builder("User")
            .field(RecordField::new("Address", FieldValue::Nil(ValueKind::Record)))
            .build();
        let report = pipeline().validate(&record).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.fields_checked, 0);
    }

    #[test]
    fn test_recurse_disabled() {
        let pipeline = ValidationPipeline::new(
            Arc::new(RegistryBuilder::new().build().unwrap()),
            PipelineOptions::new().with_recurse(false),
        );
        let report = pipeline.validate(&user("ann", None, "12a")).unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_fail_fast_stops_after_first_failure() {
        let pipeline = ValidationPipeline::new(
            Arc::new(RegistryBuilder::new().build().unwrap()),
            PipelineOptions::new().with_fail_fast(true),
        );
        let report = pipeline.validate(&user("A", Some(12), "12a")).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.get("Name").is_some());
    }

    #[test]
    fn test_custom_tag_key() {
        let record = Record::builder("User")
            .field(
                RecordField::new("Name", "")
                    .tag("validate", "min:100")
                    .tag("check", "not_empty"),
            )
            .build();
        let pipeline = ValidationPipeline::new(
            Arc::new(RegistryBuilder::new().build().unwrap()),
            PipelineOptions::new().with_tag_key("check"),
        );

        let report = pipeline.validate(&record).unwrap();
        assert_eq!(
            report.get("Name").map(|e| e.message.as_str()),
            Some("Name cannot be empty.")
        );
    }

    #[test]
    fn test_custom_validator() {
        let registry = RegistryBuilder::new()
            .register("even", |ctx: &mut ValidatorContext, options: &[String]| {
                if !options.is_empty() {
                    return Err(ValidatorError::unexpected_arguments("even"));
                }
                match ctx.value {
                    Value::Integer(i) if i % 2 == 0 => Ok(()),
                    Value::Integer(_) => Err(ValidatorError::invalid("{field} on {struct} must be even.")),
                    ref other => Err(ValidatorError::unsupported("even", other.type_name())),
                }
            })
            .build()
            .unwrap();
        let pipeline = ValidationPipeline::new(Arc::new(registry), PipelineOptions::default());

        let report = pipeline.check("Count", "numeric,even", "7").unwrap();
        assert_eq!(
            report.get("Count").map(|e| e.message.as_str()),
            Some("Count on Value must be even.")
        );
        assert!(pipeline.check("Count", "numeric,even", "8").unwrap().is_valid());
    }

    #[test]
    fn test_from_config_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tag_key = \"check\"\nfail_fast = true").unwrap();

        let pipeline = ValidationPipeline::from_config_file(file.path()).unwrap();
        assert_eq!(pipeline.options().tag_key, "check");
        assert!(pipeline.options().fail_fast);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "tag_key = \"\"").unwrap();
        assert!(matches!(
            ValidationPipeline::from_config_file(bad.path()),
            Err(TagcheckError::Config(ConfigError::EmptyTagKey))
        ));
    }

    #[test]
    fn test_default_pipeline_uses_global_registry() {
        let pipeline = ValidationPipeline::default();
        assert!(pipeline.registry().contains("numeric"));
        assert_eq!(pipeline.options().tag_key, "validate");
    }

    proptest! {
        #[test]
        fn validation_is_idempotent(
            name in "[a-zA-Z]{0,20}",
            age in proptest::option::of(-5i64..120),
            zip in "[0-9a]{0,7}",
        ) {
            let record = user(&name, age, &zip);
            let pipeline = pipeline();
            let first = pipeline.validate(&record);
            let second = pipeline.validate(&record);
            prop_assert_eq!(first, second);
        }
    }
}
