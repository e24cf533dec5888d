/// Inspection methods and `IntoFuture` impls shared by every statement type.
///
/// Usage:
/// ```ignore
/// impl_statement!(SelectStatement);
/// ```
macro_rules! impl_statement {
    ($stmt:ident) => {
        impl<S: $crate::stmt::ResultShape> $stmt<S> {
            /// The SQL text this statement runs, with `$n` placeholders.
            pub fn to_sql(&self) -> String {
                self.core.serialize().text
            }

            /// SQL text plus bound parameters, without executing.
            pub fn serialize(&self) -> $crate::token::SerializedQuery {
                self.core.serialize()
            }

            /// The statement's tokens.
            pub fn tokens(&self) -> &$crate::token::TokenList {
                self.core.tokens()
            }

            /// Keys each result row is reduced to.
            pub fn returning_keys(&self) -> &[String] {
                self.core.returning_keys()
            }
        }

        impl<'a, S: $crate::stmt::ResultShape> std::future::IntoFuture for &'a $stmt<S> {
            type Output = $crate::error::QuillResult<S::Output>;
            type IntoFuture = futures_core::future::BoxFuture<'a, Self::Output>;

            fn into_future(self) -> Self::IntoFuture {
                Box::pin(self.core.resolve::<S>())
            }
        }

        impl<S: $crate::stmt::ResultShape> std::future::IntoFuture for $stmt<S> {
            type Output = $crate::error::QuillResult<S::Output>;
            type IntoFuture = futures_core::future::BoxFuture<'static, Self::Output>;

            fn into_future(self) -> Self::IntoFuture {
                Box::pin(async move { self.core.resolve::<S>().await })
            }
        }

        impl<S> std::fmt::Debug for $stmt<S> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($stmt))
                    .field("sql", &self.core.serialize().text)
                    .field("returning_keys", &self.core.returning_keys())
                    .finish()
            }
        }
    };
}

/// Typed row helpers for statements that resolve to rows.
macro_rules! impl_fetch_as {
    ($stmt:ident) => {
        impl $stmt<$crate::stmt::Rows> {
            /// Execute and decode every row into `T`.
            pub async fn fetch_as<T: serde::de::DeserializeOwned>(
                &self,
            ) -> $crate::error::QuillResult<Vec<T>> {
                let rows = self.core.resolve::<$crate::stmt::Rows>().await?;
                rows.iter().map($crate::row::Row::decode).collect()
            }

            /// Execute and require exactly one row.
            ///
            /// - 0 rows: [`QuillError::NotFound`](crate::QuillError::NotFound)
            /// - more than 1 row: [`QuillError::TooManyRows`](crate::QuillError::TooManyRows)
            pub async fn fetch_one_as<T: serde::de::DeserializeOwned>(
                &self,
            ) -> $crate::error::QuillResult<T> {
                let rows = self.core.resolve::<$crate::stmt::Rows>().await?;
                match rows.as_slice() {
                    [] => Err($crate::error::QuillError::not_found(
                        "statement returned no rows",
                    )),
                    [row] => row.decode(),
                    _ => Err($crate::error::QuillError::too_many_rows(1, rows.len())),
                }
            }

            /// Execute and return at most one row.
            pub async fn fetch_opt_as<T: serde::de::DeserializeOwned>(
                &self,
            ) -> $crate::error::QuillResult<Option<T>> {
                let rows = self.core.resolve::<$crate::stmt::Rows>().await?;
                match rows.as_slice() {
                    [] => Ok(None),
                    [row] => row.decode().map(Some),
                    _ => Err($crate::error::QuillError::too_many_rows(1, rows.len())),
                }
            }
        }
    };
}
