//! Top-level statements

use serde::{Deserialize, Serialize};
use crate::*;

/// Every statement the parser recognizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    AlterKeyspace(AlterKeyspaceStatement),
    AlterMaterializedView(AlterMaterializedViewStatement),
    AlterRole(AlterRoleStatement),
    AlterTable(AlterTableStatement),
    AlterType(AlterTypeStatement),
    AlterUser(AlterUserStatement),
    ApplyBatch(ApplyBatchStatement),
    CreateAggregate(CreateAggregateStatement),
    CreateFunction(CreateFunctionStatement),
    CreateIndex(CreateIndexStatement),
    CreateKeyspace(CreateKeyspaceStatement),
    CreateMaterializedView(CreateMaterializedViewStatement),
    CreateRole(CreateRoleStatement),
    CreateTable(CreateTableStatement),
    CreateTrigger(CreateTriggerStatement),
    CreateType(CreateTypeStatement),
    CreateUser(CreateUserStatement),
    Delete(DeleteStatement),
    DropAggregate(DropAggregateStatement),
    DropFunction(DropFunctionStatement),
    DropIndex(DropIndexStatement),
    DropKeyspace(DropKeyspaceStatement),
    DropMaterializedView(DropMaterializedViewStatement),
    DropRole(DropRoleStatement),
    DropTable(DropTableStatement),
    DropTrigger(DropTriggerStatement),
    DropType(DropTypeStatement),
    DropUser(DropUserStatement),
    Grant(GrantStatement),
    Insert(InsertStatement),
    ListPermissions(ListPermissionsStatement),
    ListRoles(ListRolesStatement),
    Revoke(RevokeStatement),
    Select(SelectStatement),
    Truncate(TruncateStatement),
    Update(UpdateStatement),
    Use(UseStatement),
}

/// Variant tag of a [`Statement`], stable for tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    AlterKeyspace,
    AlterMaterializedView,
    AlterRole,
    AlterTable,
    AlterType,
    AlterUser,
    ApplyBatch,
    CreateAggregate,
    CreateFunction,
    CreateIndex,
    CreateKeyspace,
    CreateMaterializedView,
    CreateRole,
    CreateTable,
    CreateTrigger,
    CreateType,
    CreateUser,
    Delete,
    DropAggregate,
    DropFunction,
    DropIndex,
    DropKeyspace,
    DropMaterializedView,
    DropRole,
    DropTable,
    DropTrigger,
    DropType,
    DropUser,
    Grant,
    Insert,
    ListPermissions,
    ListRoles,
    Revoke,
    Select,
    Truncate,
    Update,
    Use,
}

impl StatementKind {
    /// Grammar rule name, as used in diagnostics
    pub fn rule_name(self) -> &'static str {
        match self {
            StatementKind::AlterKeyspace => "alterKeyspace",
            StatementKind::AlterMaterializedView => "alterMaterializedView",
            StatementKind::AlterRole => "alterRole",
            StatementKind::AlterTable => "alterTable",
            StatementKind::AlterType => "alterType",
            StatementKind::AlterUser => "alterUser",
            StatementKind::ApplyBatch => "applyBatch",
            StatementKind::CreateAggregate => "createAggregate",
            StatementKind::CreateFunction => "createFunction",
            StatementKind::CreateIndex => "createIndex",
            StatementKind::CreateKeyspace => "createKeyspace",
            StatementKind::CreateMaterializedView => "createMaterializedView",
            StatementKind::CreateRole => "createRole",
            StatementKind::CreateTable => "createTable",
            StatementKind::CreateTrigger => "createTrigger",
            StatementKind::CreateType => "createType",
            StatementKind::CreateUser => "createUser",
            StatementKind::Delete => "delete",
            StatementKind::DropAggregate => "dropAggregate",
            StatementKind::DropFunction => "dropFunction",
            StatementKind::DropIndex => "dropIndex",
            StatementKind::DropKeyspace => "dropKeyspace",
            StatementKind::DropMaterializedView => "dropMaterializedView",
            StatementKind::DropRole => "dropRole",
            StatementKind::DropTable => "dropTable",
            StatementKind::DropTrigger => "dropTrigger",
            StatementKind::DropType => "dropType",
            StatementKind::DropUser => "dropUser",
            StatementKind::Grant => "grant",
            StatementKind::Insert => "insert",
            StatementKind::ListPermissions => "listPermissions",
            StatementKind::ListRoles => "listRoles",
            StatementKind::Revoke => "revoke",
            StatementKind::Select => "select",
            StatementKind::Truncate => "truncate",
            StatementKind::Update => "update",
            StatementKind::Use => "use",
        }
    }

    pub fn is_ddl(self) -> bool {
        let name = self.rule_name();
        name.starts_with("create") || name.starts_with("alter") || name.starts_with("drop")
    }
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::AlterKeyspace(_) => StatementKind::AlterKeyspace,
            Statement::AlterMaterializedView(_) => StatementKind::AlterMaterializedView,
            Statement::AlterRole(_) => StatementKind::AlterRole,
            Statement::AlterTable(_) => StatementKind::AlterTable,
            Statement::AlterType(_) => StatementKind::AlterType,
            Statement::AlterUser(_) => StatementKind::AlterUser,
            Statement::ApplyBatch(_) => StatementKind::ApplyBatch,
            Statement::CreateAggregate(_) => StatementKind::CreateAggregate,
            Statement::CreateFunction(_) => StatementKind::CreateFunction,
            Statement::CreateIndex(_) => StatementKind::CreateIndex,
            Statement::CreateKeyspace(_) => StatementKind::CreateKeyspace,
            Statement::CreateMaterializedView(_) => StatementKind::CreateMaterializedView,
            Statement::CreateRole(_) => StatementKind::CreateRole,
            Statement::CreateTable(_) => StatementKind::CreateTable,
            Statement::CreateTrigger(_) => StatementKind::CreateTrigger,
            Statement::CreateType(_) => StatementKind::CreateType,
            Statement::CreateUser(_) => StatementKind::CreateUser,
            Statement::Delete(_) => StatementKind::Delete,
            Statement::DropAggregate(_) => StatementKind::DropAggregate,
            Statement::DropFunction(_) => StatementKind::DropFunction,
            Statement::DropIndex(_) => StatementKind::DropIndex,
            Statement::DropKeyspace(_) => StatementKind::DropKeyspace,
            Statement::DropMaterializedView(_) => StatementKind::DropMaterializedView,
            Statement::DropRole(_) => StatementKind::DropRole,
            Statement::DropTable(_) => StatementKind::DropTable,
            Statement::DropTrigger(_) => StatementKind::DropTrigger,
            Statement::DropType(_) => StatementKind::DropType,
            Statement::DropUser(_) => StatementKind::DropUser,
            Statement::Grant(_) => StatementKind::Grant,
            Statement::Insert(_) => StatementKind::Insert,
            Statement::ListPermissions(_) => StatementKind::ListPermissions,
            Statement::ListRoles(_) => StatementKind::ListRoles,
            Statement::Revoke(_) => StatementKind::Revoke,
            Statement::Select(_) => StatementKind::Select,
            Statement::Truncate(_) => StatementKind::Truncate,
            Statement::Update(_) => StatementKind::Update,
            Statement::Use(_) => StatementKind::Use,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::AlterKeyspace(s) => s.span,
            Statement::AlterMaterializedView(s) => s.span,
            Statement::AlterRole(s) => s.span,
            Statement::AlterTable(s) => s.span,
            Statement::AlterType(s) => s.span,
            Statement::AlterUser(s) => s.span,
            Statement::ApplyBatch(s) => s.span,
            Statement::CreateAggregate(s) => s.span,
            Statement::CreateFunction(s) => s.span,
            Statement::CreateIndex(s) => s.span,
            Statement::CreateKeyspace(s) => s.span,
            Statement::CreateMaterializedView(s) => s.span,
            Statement::CreateRole(s) => s.span,
            Statement::CreateTable(s) => s.span,
            Statement::CreateTrigger(s) => s.span,
            Statement::CreateType(s) => s.span,
            Statement::CreateUser(s) => s.span,
            Statement::Delete(s) => s.span,
            Statement::DropAggregate(s) => s.span,
            Statement::DropFunction(s) => s.span,
            Statement::DropIndex(s) => s.span,
            Statement::DropKeyspace(s) => s.span,
            Statement::DropMaterializedView(s) => s.span,
            Statement::DropRole(s) => s.span,
            Statement::DropTable(s) => s.span,
            Statement::DropTrigger(s) => s.span,
            Statement::DropType(s) => s.span,
            Statement::DropUser(s) => s.span,
            Statement::Grant(s) => s.span,
            Statement::Insert(s) => s.span,
            Statement::ListPermissions(s) => s.span,
            Statement::ListRoles(s) => s.span,
            Statement::Revoke(s) => s.span,
            Statement::Select(s) => s.span,
            Statement::Truncate(s) => s.span,
            Statement::Update(s) => s.span,
            Statement::Use(s) => s.span,
        }
    }

    /// The batch prefix of an INSERT, UPDATE or DELETE
    pub fn begin_batch(&self) -> Option<&BeginBatch> {
        match self {
            Statement::Insert(s) => s.begin_batch.as_ref(),
            Statement::Update(s) => s.begin_batch.as_ref(),
            Statement::Delete(s) => s.begin_batch.as_ref(),
            _ => None,
        }
    }
}
