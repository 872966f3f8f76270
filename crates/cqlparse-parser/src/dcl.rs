//! Roles, users and permission statements

use cqlparse_ast::*;
use cqlparse_lexer::TokenKind;

use crate::parser::{Parser, Result};

impl<'a> Parser<'a> {
    // ===== Roles =====

    /// `WITH option AND option ...`; empty when no WITH follows
    fn parse_role_options(&mut self) -> Result<Vec<RoleOption>> {
        let mut options = Vec::new();
        if !self.eat(TokenKind::With) {
            return Ok(options);
        }
        loop {
            options.push(self.parse_role_option()?);
            if !self.eat(TokenKind::And) {
                break;
            }
        }
        Ok(options)
    }

    fn parse_role_option(&mut self) -> Result<RoleOption> {
        self.rule("roleWithOptions", |p| {
            let keyword = p.peek();
            if !matches!(
                keyword,
                TokenKind::Password | TokenKind::Login | TokenKind::Superuser | TokenKind::Options
            ) {
                return Err(p.expected("'PASSWORD', 'LOGIN', 'SUPERUSER' or 'OPTIONS'"));
            }
            p.advance();
            p.consume(TokenKind::Eq)?;
            match keyword {
                TokenKind::Password => Ok(RoleOption::Password(p.parse_string()?)),
                TokenKind::Login => Ok(RoleOption::Login(p.parse_boolean()?)),
                TokenKind::Superuser => Ok(RoleOption::Superuser(p.parse_boolean()?)),
                _ => Ok(RoleOption::Options(p.parse_option_map()?)),
            }
        })
    }

    pub(crate) fn parse_create_role(&mut self) -> Result<CreateRoleStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        self.consume(TokenKind::Role)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier("role name")?;
        let options = self.parse_role_options()?;
        Ok(CreateRoleStatement {
            if_not_exists,
            name,
            options,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_alter_role(&mut self) -> Result<AlterRoleStatement> {
        let start = self.start();
        self.consume(TokenKind::Alter)?;
        self.consume(TokenKind::Role)?;
        let name = self.parse_identifier("role name")?;
        let options = self.parse_role_options()?;
        Ok(AlterRoleStatement {
            name,
            options,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_role(&mut self) -> Result<DropRoleStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume(TokenKind::Role)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_identifier("role name")?;
        Ok(DropRoleStatement {
            if_exists,
            name,
            span: self.finish(start),
        })
    }

    // ===== Users =====

    /// `WITH PASSWORD 'secret'`
    fn parse_user_password(&mut self) -> Result<Constant> {
        self.consume(TokenKind::With)?;
        self.consume(TokenKind::Password)?;
        self.parse_string()
    }

    fn parse_superuser_flag(&mut self) -> Option<bool> {
        if self.eat(TokenKind::Superuser) {
            Some(true)
        } else if self.eat(TokenKind::Nosuperuser) {
            Some(false)
        } else {
            None
        }
    }

    pub(crate) fn parse_create_user(&mut self) -> Result<CreateUserStatement> {
        let start = self.start();
        self.consume(TokenKind::Create)?;
        self.consume(TokenKind::User)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier("user name")?;
        let password = self.parse_user_password()?;
        let superuser = self.parse_superuser_flag();
        Ok(CreateUserStatement {
            if_not_exists,
            name,
            password,
            superuser,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_alter_user(&mut self) -> Result<AlterUserStatement> {
        let start = self.start();
        self.consume(TokenKind::Alter)?;
        self.consume(TokenKind::User)?;
        let name = self.parse_identifier("user name")?;
        let password = self.parse_user_password()?;
        let superuser = self.parse_superuser_flag();
        Ok(AlterUserStatement {
            name,
            password,
            superuser,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_drop_user(&mut self) -> Result<DropUserStatement> {
        let start = self.start();
        self.consume(TokenKind::Drop)?;
        self.consume(TokenKind::User)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_identifier("user name")?;
        Ok(DropUserStatement {
            if_exists,
            name,
            span: self.finish(start),
        })
    }

    // ===== Permissions =====

    fn parse_privilege(&mut self) -> Result<Privilege> {
        let privilege = match self.peek() {
            TokenKind::All => Privilege::All,
            TokenKind::Alter => Privilege::Alter,
            TokenKind::Authorize => Privilege::Authorize,
            TokenKind::Describe => Privilege::Describe,
            TokenKind::Execute => Privilege::Execute,
            TokenKind::Create => Privilege::Create,
            TokenKind::Drop => Privilege::Drop,
            TokenKind::Modify => Privilege::Modify,
            TokenKind::Select => Privilege::Select,
            _ => return Err(self.expected("privilege")),
        };
        self.advance();
        if !self.eat(TokenKind::Permissions) {
            self.eat(TokenKind::Permission);
        }
        Ok(privilege)
    }

    fn parse_resource(&mut self) -> Result<Resource> {
        self.rule("resource", |p| {
            if p.eat(TokenKind::All) {
                return match p.peek() {
                    TokenKind::Functions => {
                        p.advance();
                        if p.eat(TokenKind::In) {
                            p.consume(TokenKind::Keyspace)?;
                            let keyspace = p.parse_identifier("keyspace name")?;
                            Ok(Resource::AllFunctionsInKeyspace(keyspace))
                        } else {
                            Ok(Resource::AllFunctions)
                        }
                    }
                    TokenKind::Keyspaces => {
                        p.advance();
                        Ok(Resource::AllKeyspaces)
                    }
                    TokenKind::Roles => {
                        p.advance();
                        Ok(Resource::AllRoles)
                    }
                    _ => Err(p.expected("'FUNCTIONS', 'KEYSPACES' or 'ROLES'")),
                };
            }
            if p.eat(TokenKind::Function) {
                return Ok(Resource::Function(p.parse_function_name()?));
            }
            if p.eat(TokenKind::Keyspace) {
                return Ok(Resource::Keyspace(p.parse_identifier("keyspace name")?));
            }
            if p.at(TokenKind::Role) && Self::is_name(p.peek_at(1)) {
                p.advance();
                return Ok(Resource::Role(p.parse_identifier("role name")?));
            }
            let table_keyword = p.eat(TokenKind::Table);
            let name = p.parse_qualified_name("table name")?;
            Ok(Resource::Table {
                name,
                table_keyword,
            })
        })
    }

    pub(crate) fn parse_grant(&mut self) -> Result<GrantStatement> {
        let start = self.start();
        self.consume(TokenKind::Grant)?;
        let privilege = self.parse_privilege()?;
        self.consume(TokenKind::On)?;
        let resource = self.parse_resource()?;
        self.consume(TokenKind::To)?;
        let role = self.parse_identifier("role name")?;
        Ok(GrantStatement {
            privilege,
            resource,
            role,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_revoke(&mut self) -> Result<RevokeStatement> {
        let start = self.start();
        self.consume(TokenKind::Revoke)?;
        let privilege = self.parse_privilege()?;
        self.consume(TokenKind::On)?;
        let resource = self.parse_resource()?;
        self.consume(TokenKind::From)?;
        let role = self.parse_identifier("role name")?;
        Ok(RevokeStatement {
            privilege,
            resource,
            role,
            span: self.finish(start),
        })
    }

    /// `[OF role] [NORECURSIVE]`
    fn parse_list_tail(&mut self) -> Result<(Option<Identifier>, bool)> {
        let of = if self.eat(TokenKind::Of) {
            Some(self.parse_identifier("role name")?)
        } else {
            None
        };
        Ok((of, self.eat(TokenKind::Norecursive)))
    }

    pub(crate) fn parse_list_permissions(&mut self) -> Result<ListPermissionsStatement> {
        let start = self.start();
        self.consume(TokenKind::List)?;
        let privilege = self.parse_privilege()?;
        let resource = if self.eat(TokenKind::On) {
            Some(self.parse_resource()?)
        } else {
            None
        };
        let (of, norecursive) = self.parse_list_tail()?;
        Ok(ListPermissionsStatement {
            privilege,
            resource,
            of,
            norecursive,
            span: self.finish(start),
        })
    }

    pub(crate) fn parse_list_roles(&mut self) -> Result<ListRolesStatement> {
        let start = self.start();
        self.consume(TokenKind::List)?;
        self.consume(TokenKind::Roles)?;
        let (of, norecursive) = self.parse_list_tail()?;
        Ok(ListRolesStatement {
            of,
            norecursive,
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
    fn test_create_role_options() {
        let role = parser("CREATE ROLE IF NOT EXISTS app WITH PASSWORD = 'pw' AND LOGIN = true AND OPTIONS = {'a': 1}")
            .parse_create_role()
            .unwrap();
        assert!(role.if_not_exists);
        assert_eq!(role.options.len(), 3);
        assert_eq!(role.options[1], RoleOption::Login(true));
    }

    #[test]
    fn test_user_statements() {
        let user = parser("CREATE USER bob WITH PASSWORD 'pw' NOSUPERUSER").parse_create_user().unwrap();
        assert_eq!(user.superuser, Some(false));
        let user = parser("ALTER USER bob WITH PASSWORD 'x'").parse_alter_user().unwrap();
        assert_eq!(user.superuser, None);
    }

    #[test]
    fn test_grant_resources() {
        let resource = |s: &str| parser(s).parse_grant().unwrap().resource;
        assert_eq!(resource("GRANT ALL PERMISSIONS ON ALL KEYSPACES TO admin"), Resource::AllKeyspaces);
        assert!(matches!(resource("GRANT SELECT ON KEYSPACE ks TO bob"), Resource::Keyspace(_)));
        assert!(matches!(
            resource("GRANT EXECUTE ON ALL FUNCTIONS IN KEYSPACE ks TO bob"),
            Resource::AllFunctionsInKeyspace(_)
        ));
        assert!(matches!(resource("GRANT MODIFY ON TABLE ks.t TO bob"), Resource::Table { table_keyword: true, .. }));
        assert!(matches!(resource("GRANT AUTHORIZE ON ROLE admin TO bob"), Resource::Role(_)));
        assert!(matches!(resource("GRANT SELECT ON role TO bob"), Resource::Table { table_keyword: false, .. }));
    }

    #[test]
    fn test_revoke_and_list() {
        let revoke = parser("REVOKE DROP ON ks.t FROM bob").parse_revoke().unwrap();
        assert_eq!(revoke.privilege, Privilege::Drop);
        let list = parser("LIST ALL OF bob NORECURSIVE").parse_list_permissions().unwrap();
        assert!(list.resource.is_none());
        assert!(list.norecursive);
        let roles = parser("LIST ROLES OF bob").parse_list_roles().unwrap();
        assert_eq!(roles.of.map(|r| r.name), Some("bob".to_string()));
    }
}
