use swc_common::errors::{ColorConfig, Handler};
use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap, Span, Spanned};
use swc_ecma_ast::Script;
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{Parser, StringInput, Syntax};
use tracing::debug;

use crate::error::{Error, Result};

/// Parses generated externs as an ES script and returns the syntax tree.
///
/// Externs are plain scripts: a `function` per mixin record and one expression statement per
/// member. Recoverable parser errors are reported just like fatal ones, since a type checker
/// consuming the file would reject either.
pub fn check_externs(file_name: &str, source: &str) -> Result<Script> {
    Checker::new(file_name, source).run(None)
}

/// Like [`check_externs`], but renders the parser's diagnostics on the terminal as well.
pub fn check_externs_with_diagnostics(file_name: &str, source: &str) -> Result<Script> {
    let checker = Checker::new(file_name, source);
    let handler =
        Handler::with_tty_emitter(ColorConfig::Auto, true, false, Some(checker.cm.clone()));
    checker.run(Some(&handler))
}

struct Checker {
    cm: Lrc<SourceMap>,
    fm: Lrc<swc_common::SourceFile>,
}

impl Checker {
    fn new(file_name: &str, source: &str) -> Self {
        let cm = Lrc::<SourceMap>::default();
        let fm = cm.new_source_file(FileName::Custom(file_name.to_string()), source.to_string());
        Checker { cm, fm }
    }

    fn run(&self, handler: Option<&Handler>) -> Result<Script> {
        let lexer = Lexer::new(
            Syntax::Es(Default::default()),
            Default::default(),
            StringInput::from(&*self.fm),
            None,
        );

        let mut parser = Parser::new_from(lexer);
        let parsed = parser.parse_script();
        let recovered = parser.take_errors();

        let script = match parsed {
            Ok(script) => script,
            Err(e) => {
                let (span, message) = (e.span(), e.kind().msg().to_string());
                if let Some(handler) = handler {
                    e.into_diagnostic(handler).emit();
                }
                return Err(self.syntax_error(span, message));
            }
        };

        if let Some(first) = recovered.first() {
            let error = self.syntax_error(first.span(), first.kind().msg().to_string());
            if let Some(handler) = handler {
                for e in recovered {
                    e.into_diagnostic(handler).emit();
                }
            }
            return Err(error);
        }

        debug!(statements = script.body.len(), "externs parsed");
        Ok(script)
    }

    fn syntax_error(&self, span: Span, message: String) -> Error {
        let loc = self.cm.lookup_char_pos(span.lo);
        Error::Syntax {
            line: loc.line,
            column: loc.col_display,
            message,
        }
    }
}
