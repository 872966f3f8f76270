//! User-defined functions and aggregates

use cqlparse_ast::*;
use cqlparse_lexer::TokenKind;

use crate::parser::{Parser, Result};

impl<'a> Parser<'a> {
    /// `CREATE [OR REPLACE]`, returning whether `OR REPLACE` was present
    fn parse_create_or_replace(&mut self) -> Result<bool> {
        self.consume(TokenKind::Create)?;
        if self.eat(TokenKind::Or) {
            self.consume(TokenKind::Replace)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Optional `( type, ... )` after a routine name in DROP
    fn parse_optional_signature(&mut self) -> Result<Option<Vec<DataType>>> {
        if self.at(TokenKind::LParen) {
            Ok(Some(self.parse_type_signature()?))
        } else {
            Ok(None)
        }
    }

    pub(crate) fn parse_create_function(&mut self) -> Result<CreateFunctionStatement> {
        let start = self.start();
        let or_replace = self.parse_create_or_replace()?;
        self.consume(TokenKind::Function)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_function_name()?;

        self.consume(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                let param = self.parse_identifier("parameter name")?;
                let data_type = self.parse_data_type()?;
                params.push((param, data_type));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen)?;

        let on_null_input = if self.eat(TokenKind::Called) {
            NullInputBehavior::Called
        } else if self.eat(TokenKind::Returns) {
            self.consume(TokenKind::Null)?;
            NullInputBehavior::ReturnsNull
        } else {
            return Err(self.expected("'CALLED' or 'RETURNS NULL'"));
        };
        self.consume(TokenKind::On)?;
        self.consume(TokenKind::Null)?;
        self.consume(TokenKind::Input)?;

        self.consume(TokenKind::Returns)?;
        let returns = self.parse_data_type()?;
        self.consume(TokenKind::Language)?;
        let language = self.parse_identifier("language name")?;
        self.consume(TokenKind::As)?;
        let body = match self.peek() {
            TokenKind::StringLiteral | TokenKind::CodeBlock => self.parse_constant()?,
            _ => return Err(self.expected("function body")),
        };

        Ok(CreateFunctionStatement {
            or_replace,
            if_not_exists,
            name,
            params,
            on_null_input,
            returns,
            language,
            body,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_function(&mut self) -> Result<DropFunctionStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume(TokenKind::Function)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_function_name()?;
        let signature = self.parse_optional_signature()?;
        Ok(DropFunctionStatement {
            if_exists,
            name,
            signature,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_create_aggregate(&mut self) -> Result<CreateAggregateStatement> {
        let start = self.start();
        let or_replace = self.parse_create_or_replace()?;
        self.consume(TokenKind::Aggregate)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_function_name()?;
        let arg_types = self.parse_type_signature()?;

        self.consume(TokenKind::Sfunc)?;
        let sfunc = self.parse_function_name_part()?;
        self.consume(TokenKind::Stype)?;
        let stype = self.parse_data_type()?;
        let finalfunc = if self.eat(TokenKind::Finalfunc) {
            Some(self.parse_function_name_part()?)
        } else {
            None
        };
        let initcond = if self.eat(TokenKind::Initcond) {
            Some(self.parse_init_condition()?)
        } else {
            None
        };

        Ok(CreateAggregateStatement {
            or_replace,
            if_not_exists,
            name,
            arg_types,
            sfunc,
            stype,
            finalfunc,
            initcond,
            span: self.finish(start),
        })
    }

    /// Constant, `( cond, ... )` or `{ name: cond, ... }`, nested freely
    fn parse_init_condition(&mut self) -> Result<InitCondition> {
        self.rule("initCondDefinition", |p| {
            let start = p.start();
            if p.eat(TokenKind::LParen) {
                let mut items = vec![p.parse_init_condition()?];
                while p.eat(TokenKind::Comma) {
                    items.push(p.parse_init_condition()?);
                }
                p.consume(TokenKind::RParen)?;
                return Ok(InitCondition::List {
                    items,
                    span: p.finish(start),
                });
            }
            if p.eat(TokenKind::LBrace) {
                let mut entries = Vec::new();
                loop {
                    let key = p.parse_identifier("field name")?;
                    p.consume(TokenKind::Colon)?;
                    entries.push((key, p.parse_init_condition()?));
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
                p.consume(TokenKind::RBrace)?;
                return Ok(InitCondition::Hash {
                    entries,
                    span: p.finish(start),
                });
            }
            Ok(InitCondition::Constant(p.parse_constant()?))
        })
    }

    pub(crate) fn parse_drop_aggregate(&mut self) -> Result<DropAggregateStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume(TokenKind::Aggregate)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_function_name()?;
        let signature = self.parse_optional_signature()?;
        Ok(DropAggregateStatement {
            if_exists,
            name,
            signature,
            span: self.finish(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use cqlparse_ast::*;
    use cqlparse_lexer::tokenize;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, tokenize(source))
    }

    #[test]
    fn test_create_function() {
        let source = "CREATE OR REPLACE FUNCTION ks.fLog (x double) CALLED ON NULL INPUT \
                      RETURNS double LANGUAGE java AS $$ return Math.log(x); $$";
        let func = parser(source).parse_create_function().unwrap();
        assert!(func.or_replace);
        assert!(func.name.is_qualified());
        assert_eq!(func.params.len(), 1);
        assert_eq!(func.on_null_input, NullInputBehavior::Called);
        assert_eq!(func.language.name, "java");
        assert_eq!(func.body.as_str(), Some(" return Math.log(x); "));
        assert_eq!(func.span.end, source.len());
    }

    #[test]
    fn test_create_function_returns_null() {
        let source = "CREATE FUNCTION IF NOT EXISTS f () RETURNS NULL ON NULL INPUT \
                      RETURNS int LANGUAGE lua AS 'return 1'";
        let func = parser(source).parse_create_function().unwrap();
        assert!(func.if_not_exists);
        assert!(func.params.is_empty());
        assert_eq!(func.on_null_input, NullInputBehavior::ReturnsNull);
    }

    #[test]
    fn test_create_aggregate_with_initcond() {
        let source = "CREATE AGGREGATE average (int) SFUNC avgState STYPE tuple<int, bigint> \
                      FINALFUNC avgFinal INITCOND (0, 0)";
        let agg = parser(source).parse_create_aggregate().unwrap();
        assert_eq!(agg.arg_types.len(), 1);
        assert_eq!(agg.sfunc.name, "avgState");
        assert!(matches!(agg.stype.kind, DataTypeKind::Tuple(ref t) if t.len() == 2));
        assert!(matches!(agg.initcond, Some(InitCondition::List { ref items, .. }) if items.len() == 2));
    }

    #[test]
    fn test_drop_routines_with_signature() {
        let drop = parser("DROP FUNCTION IF EXISTS ks.f (int, text)").parse_drop_function().unwrap();
        assert_eq!(drop.signature.map(|s| s.len()), Some(2));
        let drop = parser("DROP AGGREGATE average").parse_drop_aggregate().unwrap();
        assert!(drop.signature.is_none());
    }

    #[test]
    fn test_function_without_null_behavior() {
        let err = parser("CREATE FUNCTION f (a int) RETURNS int LANGUAGE java AS 'x'")
            .parse_create_function()
            .unwrap_err();
        assert!(err.to_string().contains("expected 'CALLED' or 'RETURNS NULL'"));
    }
}
