//! Roles, users and permissions

use serde::{Deserialize, Serialize};
use crate::{Constant, Identifier, OptionMap, QualifiedName, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoleStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub options: Vec<RoleOption>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterRoleStatement {
    pub name: Identifier,
    pub options: Vec<RoleOption>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropRoleStatement {
    pub if_exists: bool,
    pub name: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoleOption {
    Password(Constant),
    Login(bool),
    Superuser(bool),
    Options(OptionMap),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub password: Constant,
    pub superuser: Option<bool>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterUserStatement {
    pub name: Identifier,
    pub password: Constant,
    pub superuser: Option<bool>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropUserStatement {
    pub if_exists: bool,
    pub name: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Privilege {
    /// `ALL` or `ALL PERMISSIONS`
    All,
    Alter,
    Authorize,
    Describe,
    Execute,
    Create,
    Drop,
    Modify,
    Select,
}

impl Privilege {
    pub fn keyword(self) -> &'static str {
        match self {
            Privilege::All => "ALL PERMISSIONS",
            Privilege::Alter => "ALTER",
            Privilege::Authorize => "AUTHORIZE",
            Privilege::Describe => "DESCRIBE",
            Privilege::Execute => "EXECUTE",
            Privilege::Create => "CREATE",
            Privilege::Drop => "DROP",
            Privilege::Modify => "MODIFY",
            Privilege::Select => "SELECT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resource {
    AllFunctions,
    AllFunctionsInKeyspace(Identifier),
    Function(QualifiedName),
    AllKeyspaces,
    Keyspace(Identifier),
    /// `[TABLE] ks.t`
    Table { name: QualifiedName, table_keyword: bool },
    AllRoles,
    Role(Identifier),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantStatement {
    pub privilege: Privilege,
    pub resource: Resource,
    pub role: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevokeStatement {
    pub privilege: Privilege,
    pub resource: Resource,
    pub role: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPermissionsStatement {
    pub privilege: Privilege,
    pub resource: Option<Resource>,
    pub of: Option<Identifier>,
    pub norecursive: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRolesStatement {
    pub of: Option<Identifier>,
    pub norecursive: bool,
    pub span: Span,
}
