/// Strict text templates over stack outputs.
use std::sync::{Arc, Mutex};

use minijinja::value::{Enumerator, Object, Value};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};

use super::collect::OutputMap;
use super::errors::OutputsError;

/// Name under which the whole map is reachable, for keys that are not
/// valid identifiers (`{{ outputs["My-Key"] }}`).
pub const OUTPUTS_VAR: &str = "outputs";

/// A parsed template. Every undefined lookup fails the render.
#[derive(Debug)]
pub struct ParsedTemplate {
    env: Environment<'static>,
    name: String,
}

impl ParsedTemplate {
    /// Parse `source`, registered under `name` for error messages.
    ///
    /// # Errors
    ///
    /// Returns `OutputsError::TemplateParse` on a syntax error.
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self, OutputsError> {
        let name = name.into();
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.add_template_owned(name.clone(), source.into())
            .map_err(|e| OutputsError::TemplateParse {
                name: name.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { env, name })
    }

    /// Template name as given to [`ParsedTemplate::parse`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the template with every output as a top-level variable.
    ///
    /// # Errors
    ///
    /// Returns `OutputsError::Render` if the template touches an undefined
    /// key or otherwise fails at runtime.
    pub fn render(&self, outputs: &OutputMap) -> Result<String, OutputsError> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| OutputsError::Render {
                key: None,
                message: e.to_string(),
            })?;

        let missing = Arc::new(Mutex::new(None));
        let ctx = OutputsContext {
            outputs: Arc::new(outputs.clone()),
            missing: Arc::clone(&missing),
            root: true,
        };

        template.render(Value::from_object(ctx)).map_err(|e| {
            let key = if e.kind() == ErrorKind::UndefinedError {
                missing.lock().ok().and_then(|mut slot| slot.take())
            } else {
                None
            };
            OutputsError::Render {
                key,
                message: e.to_string(),
            }
        })
    }
}

/// Render context over the outputs. Remembers the last name it could not
/// resolve, which is the one a strict undefined error was raised for.
#[derive(Debug)]
struct OutputsContext {
    outputs: Arc<OutputMap>,
    missing: Arc<Mutex<Option<String>>>,
    /// Only the top level binds `outputs`.
    root: bool,
}

impl Object for OutputsContext {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let name = key.as_str()?;
        if let Some(value) = self.outputs.get(name) {
            return Some(Value::from(value));
        }
        if self.root && name == OUTPUTS_VAR {
            return Some(Value::from_object(Self {
                outputs: Arc::clone(&self.outputs),
                missing: Arc::clone(&self.missing),
                root: false,
            }));
        }
        if let Ok(mut slot) = self.missing.lock() {
            *slot = Some(name.to_owned());
        }
        None
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Values(self.outputs.iter().map(|(k, _)| Value::from(k)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::collect::{OutputPair, collect};

    fn map(entries: &[(&str, &str)]) -> OutputMap {
        collect(entries.iter().map(|(k, v)| OutputPair::new(*k, *v)))
    }

    #[test]
    fn test_render_present_key() {
        let tpl = ParsedTemplate::parse("t", "{{ A }}").unwrap();
        assert_eq!(tpl.render(&map(&[("A", "1")])).unwrap(), "1");
    }

    #[test]
    fn test_render_missing_key_is_error() {
        let tpl = ParsedTemplate::parse("t", "{{ B }}").unwrap();
        let err = tpl.render(&map(&[("A", "1")])).unwrap_err();
        match err {
            OutputsError::Render { key, .. } => assert_eq!(key.as_deref(), Some("B")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_in_untaken_branch_is_ok() {
        let tpl = ParsedTemplate::parse("t", "{% if false %}{{ B }}{% endif %}ok").unwrap();
        assert_eq!(tpl.render(&map(&[("A", "1")])).unwrap(), "ok");
    }

    fn missing_key_of(source: &str, outputs: &OutputMap) -> Option<String> {
        let tpl = ParsedTemplate::parse("t", source).unwrap();
        match tpl.render(outputs).unwrap_err() {
            OutputsError::Render { key, .. } => key,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_is_the_one_evaluated() {
        let m = map(&[("Env", "prod")]);
        let key = missing_key_of(
            r#"{% if Env == "prod" %}{{ Zed }}{% else %}{{ Alpha }}{% endif %}"#,
            &m,
        );
        assert_eq!(key.as_deref(), Some("Zed"));
    }

    #[test]
    fn test_missing_key_through_outputs_var() {
        let m = map(&[("A", "1")]);
        let key = missing_key_of(r#"{% if false %}{{ B }}{% endif %}{{ outputs["X"] }}"#, &m);
        assert_eq!(key.as_deref(), Some("X"));
    }

    #[test]
    fn test_defined_check_does_not_mask_missing_key() {
        let m = map(&[("A", "1")]);
        let key = missing_key_of("{% if Opt is defined %}{{ Opt }}{% endif %}{{ Need }}", &m);
        assert_eq!(key.as_deref(), Some("Need"));
    }

    #[test]
    fn test_outputs_var_for_non_identifier_keys() {
        let tpl = ParsedTemplate::parse("t", r#"{{ outputs["My-Key"] }}"#).unwrap();
        assert_eq!(tpl.render(&map(&[("My-Key", "v")])).unwrap(), "v");
    }

    #[test]
    fn test_outputs_var_missing_key_is_error() {
        let tpl = ParsedTemplate::parse("t", r#"{{ outputs["Nope"] }}"#).unwrap();
        assert!(matches!(
            tpl.render(&map(&[("A", "1")])),
            Err(OutputsError::Render { .. })
        ));
    }

    #[test]
    fn test_real_outputs_key_wins() {
        let tpl = ParsedTemplate::parse("t", "{{ outputs }}").unwrap();
        assert_eq!(tpl.render(&map(&[("outputs", "x")])).unwrap(), "x");
    }

    #[test]
    fn test_loop_over_outputs_is_sorted() {
        let tpl = ParsedTemplate::parse(
            "t",
            "{% for k, v in outputs|items %}{{ k }}={{ v }};{% endfor %}",
        )
        .unwrap();
        assert_eq!(
            tpl.render(&map(&[("B", "2"), ("A", "1")])).unwrap(),
            "A=1;B=2;"
        );
    }

    #[test]
    fn test_no_html_escaping_and_trailing_newline_kept() {
        let tpl = ParsedTemplate::parse("page.html", "url={{ U }}\n").unwrap();
        assert_eq!(
            tpl.render(&map(&[("U", "https://x/?a=1&b=<2>")])).unwrap(),
            "url=https://x/?a=1&b=<2>\n"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = ParsedTemplate::parse("broken.tpl", "{{ A ").unwrap_err();
        match err {
            OutputsError::TemplateParse { name, .. } => assert_eq!(name, "broken.tpl"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_render_is_repeatable() {
        let tpl = ParsedTemplate::parse("t", "{{ A }}-{{ B }}").unwrap();
        let m = map(&[("A", "1"), ("B", "2")]);
        assert_eq!(tpl.render(&m).unwrap(), tpl.render(&m).unwrap());
    }
}
