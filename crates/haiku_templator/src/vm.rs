//! Jsonnet virtual machine.
//!
//! Wraps a `jrsonnet` evaluation state configured with the import search
//! paths of an environment, the standard library and the native helpers from
//! [`crate::native`].

use std::fs;
use std::path::{Path, PathBuf};

use jrsonnet_evaluator::{
    error::ErrorKind,
    function::{builtin, builtin::StaticBuiltin},
    manifest::JsonFormat,
    parser::{ParserSettings, Source, SourceFile, SourcePath},
    trace::PathResolver,
    Error as JrError, FileImportResolver, IStr, Result as JrResult, State, Val,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{NativeError, TemplatorError, TemplatorResult};
use crate::native;

/// Native helpers bound into every VM, by the name Jsonnet code passes to
/// `std.native`.
static NATIVES: [(&str, &dyn StaticBuiltin); 7] = [
    ("parseJson", builtin_parse_json::INST),
    ("parseYaml", builtin_parse_yaml::INST),
    ("manifestJsonFromJson", builtin_manifest_json_from_json::INST),
    ("manifestYamlFromJson", builtin_manifest_yaml_from_json::INST),
    ("escapeStringRegex", builtin_escape_string_regex::INST),
    ("regexMatch", builtin_regex_match::INST),
    ("regexSubst", builtin_regex_subst::INST),
];

/// Names of the native helpers available through `std.native`.
pub fn native_names() -> impl Iterator<Item = &'static str> {
    NATIVES.iter().map(|(name, _)| *name)
}

/// A configured Jsonnet evaluator.
pub struct JsonnetVm {
    state: State,
    import_paths: Vec<PathBuf>,
}

impl JsonnetVm {
    /// Create a VM searching `import_paths`, in order, for imports that are
    /// not found next to the importing file.
    pub fn new(import_paths: Vec<PathBuf>) -> Self {
        let state = State::default();
        state.set_import_resolver(FileImportResolver::new(import_paths.clone()));

        let context = jrsonnet_stdlib::ContextInitializer::new(
            state.clone(),
            PathResolver::new_cwd_fallback(),
        );
        for (name, native) in NATIVES.iter() {
            context.add_native(*name, *native);
        }
        state.set_context_initializer(context);

        debug!("Created Jsonnet VM with import paths {:?}", import_paths);
        Self {
            state,
            import_paths,
        }
    }

    pub fn import_paths(&self) -> &[PathBuf] {
        &self.import_paths
    }

    /// Evaluate a file and return the result serialized as JSON.
    ///
    /// Relative imports are resolved next to the file first.
    pub fn evaluate_file(&self, path: &Path) -> TemplatorResult<String> {
        let code = fs::read_to_string(path)?;
        let source_path = SourcePath::new(SourceFile::new(path.canonicalize()?));
        debug!("Evaluating {:?}", path);
        self.evaluate_source(source_path, &code)
    }

    /// Evaluate inline code; relative imports resolve from the current directory.
    pub fn evaluate_snippet(&self, code: &str) -> TemplatorResult<String> {
        self.evaluate_source(SourcePath::default(), code)
    }

    fn evaluate_source(&self, path: SourcePath, code: &str) -> TemplatorResult<String> {
        let source = Source::new(path, code.into());
        let parsed = jrsonnet_evaluator::parser::parse(
            code,
            &ParserSettings {
                source: source.clone(),
            },
        )
        .map_err(|e| TemplatorError::Evaluation(format!("syntax error: {}", e)))?;

        let value = jrsonnet_evaluator::evaluate(self.state.create_default_context(source), &parsed)
            .map_err(evaluation_error)?;
        value
            .manifest(JsonFormat::default())
            .map_err(evaluation_error)
    }
}

fn evaluation_error(err: JrError) -> TemplatorError {
    TemplatorError::Evaluation(err.to_string().trim_end().to_string())
}

fn native_error(err: NativeError) -> JrError {
    JrError::from(ErrorKind::RuntimeError(err.to_string().into()))
}

fn to_val(value: serde_json::Value) -> JrResult<Val> {
    Val::deserialize(value).map_err(|e| native_error(NativeError::Json(e)))
}

#[builtin]
fn builtin_parse_json(json: IStr) -> JrResult<Val> {
    to_val(native::parse_json(&json).map_err(native_error)?)
}

#[builtin]
fn builtin_parse_yaml(yaml: IStr) -> JrResult<Val> {
    let docs = native::parse_yaml(&yaml).map_err(native_error)?;
    to_val(serde_json::Value::Array(docs))
}

#[builtin]
fn builtin_manifest_json_from_json(json: IStr, indent: usize) -> JrResult<String> {
    native::manifest_json_from_json(&json, indent).map_err(native_error)
}

#[builtin]
fn builtin_manifest_yaml_from_json(json: IStr) -> JrResult<String> {
    native::manifest_yaml_from_json(&json).map_err(native_error)
}

#[builtin]
fn builtin_escape_string_regex(str: IStr) -> JrResult<String> {
    Ok(native::escape_string_regex(&str))
}

#[builtin]
fn builtin_regex_match(regex: IStr, string: IStr) -> JrResult<bool> {
    native::regex_match(&regex, &string).map_err(native_error)
}

#[builtin]
fn builtin_regex_subst(regex: IStr, src: IStr, repl: IStr) -> JrResult<String> {
    native::regex_subst(&regex, &src, &repl).map_err(native_error)
}
