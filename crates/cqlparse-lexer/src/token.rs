//! Token definitions for CQL3

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]                  // Skip whitespace
#[logos(skip r"//[^\r\n]*")]                      // Skip line comments
#[logos(skip r"--[^\r\n]+")]                      // `--` followed by text is a comment
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]          // Skip block comments
pub enum TokenKind {
    // === Keywords ===
    #[token("add", ignore(ascii_case))]
    Add,
    #[token("aggregate", ignore(ascii_case))]
    Aggregate,
    #[token("all", ignore(ascii_case))]
    All,
    #[token("allow", ignore(ascii_case))]
    Allow,
    #[token("alter", ignore(ascii_case))]
    Alter,
    #[token("and", ignore(ascii_case))]
    And,
    #[token("apply", ignore(ascii_case))]
    Apply,
    #[token("as", ignore(ascii_case))]
    As,
    #[token("asc", ignore(ascii_case))]
    Asc,
    #[token("ascii", ignore(ascii_case))]
    Ascii,
    #[token("authorize", ignore(ascii_case))]
    Authorize,
    #[token("batch", ignore(ascii_case))]
    Batch,
    #[token("begin", ignore(ascii_case))]
    Begin,
    #[token("bigint", ignore(ascii_case))]
    Bigint,
    #[token("blob", ignore(ascii_case))]
    Blob,
    #[token("boolean", ignore(ascii_case))]
    Boolean,
    #[token("by", ignore(ascii_case))]
    By,
    #[token("called", ignore(ascii_case))]
    Called,
    #[token("clustering", ignore(ascii_case))]
    Clustering,
    #[token("columnfamily", ignore(ascii_case))]
    Columnfamily,
    #[token("compact", ignore(ascii_case))]
    Compact,
    #[token("contains", ignore(ascii_case))]
    Contains,
    #[token("counter", ignore(ascii_case))]
    Counter,
    #[token("create", ignore(ascii_case))]
    Create,
    #[token("custom", ignore(ascii_case))]
    Custom,
    #[token("date", ignore(ascii_case))]
    Date,
    #[token("decimal", ignore(ascii_case))]
    Decimal,
    #[token("delete", ignore(ascii_case))]
    Delete,
    #[token("desc", ignore(ascii_case))]
    Desc,
    #[token("describe", ignore(ascii_case))]
    Describe,
    #[token("distinct", ignore(ascii_case))]
    Distinct,
    #[token("double", ignore(ascii_case))]
    Double,
    #[token("drop", ignore(ascii_case))]
    Drop,
    #[token("durable_writes", ignore(ascii_case))]
    DurableWrites,
    #[token("duration", ignore(ascii_case))]
    Duration,
    #[token("entries", ignore(ascii_case))]
    Entries,
    #[token("execute", ignore(ascii_case))]
    Execute,
    #[token("exists", ignore(ascii_case))]
    Exists,
    #[token("false", ignore(ascii_case))]
    False,
    #[token("filtering", ignore(ascii_case))]
    Filtering,
    #[token("finalfunc", ignore(ascii_case))]
    Finalfunc,
    #[token("float", ignore(ascii_case))]
    Float,
    #[token("from", ignore(ascii_case))]
    From,
    #[token("frozen", ignore(ascii_case))]
    Frozen,
    #[token("full", ignore(ascii_case))]
    Full,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("functions", ignore(ascii_case))]
    Functions,
    #[token("grant", ignore(ascii_case))]
    Grant,
    #[token("if", ignore(ascii_case))]
    If,
    #[token("in", ignore(ascii_case))]
    In,
    #[token("index", ignore(ascii_case))]
    Index,
    #[token("inet", ignore(ascii_case))]
    Inet,
    #[token("infinity", ignore(ascii_case))]
    Infinity,
    #[token("initcond", ignore(ascii_case))]
    Initcond,
    #[token("input", ignore(ascii_case))]
    Input,
    #[token("insert", ignore(ascii_case))]
    Insert,
    #[token("int", ignore(ascii_case))]
    Int,
    #[token("into", ignore(ascii_case))]
    Into,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("json", ignore(ascii_case))]
    Json,
    #[token("key", ignore(ascii_case))]
    Key,
    #[token("keys", ignore(ascii_case))]
    Keys,
    #[token("keyspace", ignore(ascii_case))]
    Keyspace,
    #[token("keyspaces", ignore(ascii_case))]
    Keyspaces,
    #[token("language", ignore(ascii_case))]
    Language,
    #[token("limit", ignore(ascii_case))]
    Limit,
    #[token("list", ignore(ascii_case))]
    List,
    #[token("logged", ignore(ascii_case))]
    Logged,
    #[token("login", ignore(ascii_case))]
    Login,
    #[token("map", ignore(ascii_case))]
    Map,
    #[token("materialized", ignore(ascii_case))]
    Materialized,
    #[token("modify", ignore(ascii_case))]
    Modify,
    #[token("nan", ignore(ascii_case))]
    Nan,
    #[token("norecursive", ignore(ascii_case))]
    Norecursive,
    #[token("nosuperuser", ignore(ascii_case))]
    Nosuperuser,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("of", ignore(ascii_case))]
    Of,
    #[token("on", ignore(ascii_case))]
    On,
    #[token("options", ignore(ascii_case))]
    Options,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("order", ignore(ascii_case))]
    Order,
    #[token("partition", ignore(ascii_case))]
    Partition,
    #[token("password", ignore(ascii_case))]
    Password,
    #[token("per", ignore(ascii_case))]
    Per,
    #[token("permission", ignore(ascii_case))]
    Permission,
    #[token("permissions", ignore(ascii_case))]
    Permissions,
    #[token("primary", ignore(ascii_case))]
    Primary,
    #[token("rename", ignore(ascii_case))]
    Rename,
    #[token("replace", ignore(ascii_case))]
    Replace,
    #[token("replication", ignore(ascii_case))]
    Replication,
    #[token("returns", ignore(ascii_case))]
    Returns,
    #[token("revoke", ignore(ascii_case))]
    Revoke,
    #[token("role", ignore(ascii_case))]
    Role,
    #[token("roles", ignore(ascii_case))]
    Roles,
    #[token("schema", ignore(ascii_case))]
    Schema,
    #[token("select", ignore(ascii_case))]
    Select,
    #[token("set", ignore(ascii_case))]
    Set,
    #[token("sfunc", ignore(ascii_case))]
    Sfunc,
    #[token("smallint", ignore(ascii_case))]
    Smallint,
    #[token("static", ignore(ascii_case))]
    Static,
    #[token("storage", ignore(ascii_case))]
    Storage,
    #[token("stype", ignore(ascii_case))]
    Stype,
    #[token("superuser", ignore(ascii_case))]
    Superuser,
    #[token("table", ignore(ascii_case))]
    Table,
    #[token("text", ignore(ascii_case))]
    Text,
    #[token("time", ignore(ascii_case))]
    Time,
    #[token("timestamp", ignore(ascii_case))]
    Timestamp,
    #[token("timeuuid", ignore(ascii_case))]
    Timeuuid,
    #[token("tinyint", ignore(ascii_case))]
    Tinyint,
    #[token("to", ignore(ascii_case))]
    To,
    #[token("token", ignore(ascii_case))]
    Token,
    #[token("trigger", ignore(ascii_case))]
    Trigger,
    #[token("true", ignore(ascii_case))]
    True,
    #[token("truncate", ignore(ascii_case))]
    Truncate,
    #[token("ttl", ignore(ascii_case))]
    Ttl,
    #[token("tuple", ignore(ascii_case))]
    Tuple,
    #[token("type", ignore(ascii_case))]
    Type,
    #[token("unlogged", ignore(ascii_case))]
    Unlogged,
    #[token("update", ignore(ascii_case))]
    Update,
    #[token("use", ignore(ascii_case))]
    Use,
    #[token("user", ignore(ascii_case))]
    User,
    #[token("using", ignore(ascii_case))]
    Using,
    #[token("uuid", ignore(ascii_case))]
    Uuid,
    #[token("values", ignore(ascii_case))]
    Values,
    #[token("varchar", ignore(ascii_case))]
    Varchar,
    #[token("varint", ignore(ascii_case))]
    Varint,
    #[token("view", ignore(ascii_case))]
    View,
    #[token("where", ignore(ascii_case))]
    Where,
    #[token("with", ignore(ascii_case))]
    With,
    #[token("writetime", ignore(ascii_case))]
    Writetime,

    // === Operators ===
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // === Punctuation ===
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    /// A bare `--` with nothing after it on the line
    #[token("--")]
    CommentMarker,

    // === Literals ===
    #[regex(r"[0-9]+", priority = 2)]
    DecimalLiteral,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    FloatLiteral,

    #[regex(r"0[xX][0-9a-fA-F]*")]
    HexLiteral,

    #[regex(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")]
    UuidLiteral,

    #[regex(r"'([^']|'')*'")]
    StringLiteral,

    #[regex(r"\$\$([^$]|\$[^$])*\$\$")]
    CodeBlock,

    // === Identifiers ===
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r#""([^"]|"")*""#)]
    QuotedName,

    // === Special ===
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        !matches!(
            self,
            TokenKind::Eq
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::Semicolon
                | TokenKind::Dot
                | TokenKind::CommentMarker
                | TokenKind::DecimalLiteral
                | TokenKind::FloatLiteral
                | TokenKind::HexLiteral
                | TokenKind::UuidLiteral
                | TokenKind::StringLiteral
                | TokenKind::CodeBlock
                | TokenKind::Ident
                | TokenKind::QuotedName
                | TokenKind::Error
                | TokenKind::Eof
        )
    }

    /// Keywords that may also stand in for a name where the grammar allows it
    pub fn is_soft_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Role
                | TokenKind::Permissions
                | TokenKind::Options
                | TokenKind::DurableWrites
                | TokenKind::Language
                | TokenKind::Type
                | TokenKind::Initcond
                | TokenKind::Replication
                | TokenKind::Ttl
                | TokenKind::Partition
                | TokenKind::Key
        )
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Add => "'ADD'",
            TokenKind::Aggregate => "'AGGREGATE'",
            TokenKind::All => "'ALL'",
            TokenKind::Allow => "'ALLOW'",
            TokenKind::Alter => "'ALTER'",
            TokenKind::And => "'AND'",
            TokenKind::Apply => "'APPLY'",
            TokenKind::As => "'AS'",
            TokenKind::Asc => "'ASC'",
            TokenKind::Ascii => "'ASCII'",
            TokenKind::Authorize => "'AUTHORIZE'",
            TokenKind::Batch => "'BATCH'",
            TokenKind::Begin => "'BEGIN'",
            TokenKind::Bigint => "'BIGINT'",
            TokenKind::Blob => "'BLOB'",
            TokenKind::Boolean => "'BOOLEAN'",
            TokenKind::By => "'BY'",
            TokenKind::Called => "'CALLED'",
            TokenKind::Clustering => "'CLUSTERING'",
            TokenKind::Columnfamily => "'COLUMNFAMILY'",
            TokenKind::Compact => "'COMPACT'",
            TokenKind::Contains => "'CONTAINS'",
            TokenKind::Counter => "'COUNTER'",
            TokenKind::Create => "'CREATE'",
            TokenKind::Custom => "'CUSTOM'",
            TokenKind::Date => "'DATE'",
            TokenKind::Decimal => "'DECIMAL'",
            TokenKind::Delete => "'DELETE'",
            TokenKind::Desc => "'DESC'",
            TokenKind::Describe => "'DESCRIBE'",
            TokenKind::Distinct => "'DISTINCT'",
            TokenKind::Double => "'DOUBLE'",
            TokenKind::Drop => "'DROP'",
            TokenKind::DurableWrites => "'DURABLE_WRITES'",
            TokenKind::Duration => "'DURATION'",
            TokenKind::Entries => "'ENTRIES'",
            TokenKind::Execute => "'EXECUTE'",
            TokenKind::Exists => "'EXISTS'",
            TokenKind::False => "'FALSE'",
            TokenKind::Filtering => "'FILTERING'",
            TokenKind::Finalfunc => "'FINALFUNC'",
            TokenKind::Float => "'FLOAT'",
            TokenKind::From => "'FROM'",
            TokenKind::Frozen => "'FROZEN'",
            TokenKind::Full => "'FULL'",
            TokenKind::Function => "'FUNCTION'",
            TokenKind::Functions => "'FUNCTIONS'",
            TokenKind::Grant => "'GRANT'",
            TokenKind::If => "'IF'",
            TokenKind::In => "'IN'",
            TokenKind::Index => "'INDEX'",
            TokenKind::Inet => "'INET'",
            TokenKind::Infinity => "'INFINITY'",
            TokenKind::Initcond => "'INITCOND'",
            TokenKind::Input => "'INPUT'",
            TokenKind::Insert => "'INSERT'",
            TokenKind::Int => "'INT'",
            TokenKind::Into => "'INTO'",
            TokenKind::Is => "'IS'",
            TokenKind::Json => "'JSON'",
            TokenKind::Key => "'KEY'",
            TokenKind::Keys => "'KEYS'",
            TokenKind::Keyspace => "'KEYSPACE'",
            TokenKind::Keyspaces => "'KEYSPACES'",
            TokenKind::Language => "'LANGUAGE'",
            TokenKind::Limit => "'LIMIT'",
            TokenKind::List => "'LIST'",
            TokenKind::Logged => "'LOGGED'",
            TokenKind::Login => "'LOGIN'",
            TokenKind::Map => "'MAP'",
            TokenKind::Materialized => "'MATERIALIZED'",
            TokenKind::Modify => "'MODIFY'",
            TokenKind::Nan => "'NAN'",
            TokenKind::Norecursive => "'NORECURSIVE'",
            TokenKind::Nosuperuser => "'NOSUPERUSER'",
            TokenKind::Not => "'NOT'",
            TokenKind::Null => "'NULL'",
            TokenKind::Of => "'OF'",
            TokenKind::On => "'ON'",
            TokenKind::Options => "'OPTIONS'",
            TokenKind::Or => "'OR'",
            TokenKind::Order => "'ORDER'",
            TokenKind::Partition => "'PARTITION'",
            TokenKind::Password => "'PASSWORD'",
            TokenKind::Per => "'PER'",
            TokenKind::Permission => "'PERMISSION'",
            TokenKind::Permissions => "'PERMISSIONS'",
            TokenKind::Primary => "'PRIMARY'",
            TokenKind::Rename => "'RENAME'",
            TokenKind::Replace => "'REPLACE'",
            TokenKind::Replication => "'REPLICATION'",
            TokenKind::Returns => "'RETURNS'",
            TokenKind::Revoke => "'REVOKE'",
            TokenKind::Role => "'ROLE'",
            TokenKind::Roles => "'ROLES'",
            TokenKind::Schema => "'SCHEMA'",
            TokenKind::Select => "'SELECT'",
            TokenKind::Set => "'SET'",
            TokenKind::Sfunc => "'SFUNC'",
            TokenKind::Smallint => "'SMALLINT'",
            TokenKind::Static => "'STATIC'",
            TokenKind::Storage => "'STORAGE'",
            TokenKind::Stype => "'STYPE'",
            TokenKind::Superuser => "'SUPERUSER'",
            TokenKind::Table => "'TABLE'",
            TokenKind::Text => "'TEXT'",
            TokenKind::Time => "'TIME'",
            TokenKind::Timestamp => "'TIMESTAMP'",
            TokenKind::Timeuuid => "'TIMEUUID'",
            TokenKind::Tinyint => "'TINYINT'",
            TokenKind::To => "'TO'",
            TokenKind::Token => "'TOKEN'",
            TokenKind::Trigger => "'TRIGGER'",
            TokenKind::True => "'TRUE'",
            TokenKind::Truncate => "'TRUNCATE'",
            TokenKind::Ttl => "'TTL'",
            TokenKind::Tuple => "'TUPLE'",
            TokenKind::Type => "'TYPE'",
            TokenKind::Unlogged => "'UNLOGGED'",
            TokenKind::Update => "'UPDATE'",
            TokenKind::Use => "'USE'",
            TokenKind::User => "'USER'",
            TokenKind::Using => "'USING'",
            TokenKind::Uuid => "'UUID'",
            TokenKind::Values => "'VALUES'",
            TokenKind::Varchar => "'VARCHAR'",
            TokenKind::Varint => "'VARINT'",
            TokenKind::View => "'VIEW'",
            TokenKind::Where => "'WHERE'",
            TokenKind::With => "'WITH'",
            TokenKind::Writetime => "'WRITETIME'",
            TokenKind::Eq => "'='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::CommentMarker => "'--'",
            TokenKind::DecimalLiteral => "integer",
            TokenKind::FloatLiteral => "float",
            TokenKind::HexLiteral => "hex literal",
            TokenKind::UuidLiteral => "uuid",
            TokenKind::StringLiteral => "string",
            TokenKind::CodeBlock => "code block",
            TokenKind::Ident => "identifier",
            TokenKind::QuotedName => "quoted identifier",
            TokenKind::Error => "error",
            TokenKind::Eof => "end of input",
        }
    }

    /// Upper-case keyword text, `None` for non-keywords
    pub fn keyword(&self) -> Option<&'static str> {
        if self.is_keyword() {
            Some(self.describe().trim_matches('\''))
        } else {
            None
        }
    }
}
