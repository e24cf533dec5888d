use super::{Token, TokenList};
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Final SQL text and its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedQuery {
    pub text: String,
    pub parameters: Vec<Value>,
}

impl SerializedQuery {
    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.parameters
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Flatten a token list into SQL text with `$1..$n` placeholders.
///
/// Parameters are numbered in pre-order: the Nth `Parameter` visited anywhere
/// in the tree becomes `$N` and the Nth entry of `parameters`.
pub fn serialize(tokens: &TokenList) -> SerializedQuery {
    let mut flattener = Flattener::default();
    let mut fragments = Vec::new();
    for chunk in tokens.chunks() {
        flattener.flatten(chunk, &mut fragments);
    }
    SerializedQuery {
        text: fragments.join(" "),
        parameters: flattener.parameters,
    }
}

#[derive(Default)]
struct Flattener {
    parameters: Vec<Value>,
}

impl Flattener {
    fn flatten(&mut self, tokens: &[Token], out: &mut Vec<String>) {
        for token in tokens {
            match token {
                Token::Literal(text) => out.push(text.clone()),
                Token::Parameter(value) => {
                    self.parameters.push(value.clone());
                    out.push(format!("${}", self.parameters.len()));
                }
                Token::Group(children) => {
                    let inner = self.flatten_joined(children);
                    out.push(format!("({inner})"));
                }
                Token::Collection(children) => {
                    let inner = self.flatten_joined(children);
                    out.push(inner);
                }
                Token::Separator { glue, items } => {
                    let mut parts = Vec::with_capacity(items.len());
                    for item in items {
                        parts.push(self.flatten_joined(std::slice::from_ref(item)));
                    }
                    out.push(parts.join(&format!("{glue} ")));
                }
            }
        }
    }

    fn flatten_joined(&mut self, tokens: &[Token]) -> String {
        let mut fragments = Vec::with_capacity(tokens.len());
        self.flatten(tokens, &mut fragments);
        fragments.join(" ")
    }
}
