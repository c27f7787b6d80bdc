//! MySQL word tables and the word classifier.
//!
//! Words are looked up case-insensitively against static tables, in a fixed
//! priority order: literals, word operators, reserved keywords, non-reserved
//! keywords, builtin functions. Anything else is a plain name.
//!
//! A word may sit in more than one table (`LEFT` is reserved and a function,
//! `DAY` is a keyword and a function). Classification picks the first table;
//! the parser still treats such a word as a function when it is called, see
//! [`is_function_name`].

use crate::sql::token_kind::{KeywordClass, LiteralClass, NameClass, OperatorClass, TokenKind};
use std::{collections::HashSet, sync::LazyLock};

pub const LITERALS: &[&str] = &["true", "false", "null"];

pub const WORD_OPERATORS: &[&str] = &[
    "and", "between", "div", "in", "is", "like", "mod", "not", "or", "regexp", "rlike", "sounds",
    "xor",
];

pub const RESERVED: &[&str] = &[
    "accessible", "add", "all", "alter", "analyze", "as", "asc", "asensitive", "before",
    "bigint", "binary", "blob", "both", "by", "call", "cascade", "case", "change", "char",
    "character", "check", "collate", "column", "condition", "constraint", "continue",
    "convert", "create", "cross", "cube", "cume_dist", "current_date", "current_time",
    "current_timestamp", "current_user", "cursor", "database", "databases", "day_hour",
    "day_microsecond", "day_minute", "day_second", "dec", "decimal", "declare", "default",
    "delayed", "delete", "dense_rank", "desc", "describe", "deterministic", "distinct",
    "distinctrow", "double", "drop", "dual", "each", "else", "elseif", "empty", "enclosed",
    "escaped", "except", "exists", "exit", "explain", "fetch", "first_value", "float",
    "float4", "float8", "for", "force", "foreign", "from", "fulltext", "function", "generated",
    "get", "grant", "group", "grouping", "groups", "having", "high_priority",
    "hour_microsecond", "hour_minute", "hour_second", "if", "ignore", "index", "infile",
    "inner", "inout", "insensitive", "insert", "int", "int1", "int2", "int3", "int4", "int8",
    "integer", "intersect", "interval", "into", "io_after_gtids", "io_before_gtids",
    "iterate", "join", "json_table", "key", "keys", "kill", "lag", "last_value", "lateral",
    "lead", "leading", "leave", "left", "limit", "linear", "lines", "load", "localtime",
    "localtimestamp", "lock", "long", "longblob", "longtext", "loop", "low_priority",
    "master_bind", "master_ssl_verify_server_cert", "match", "maxvalue", "mediumblob",
    "mediumint", "mediumtext", "middleint", "minute_microsecond", "minute_second",
    "modifies", "natural", "no_write_to_binlog", "nth_value", "ntile", "numeric", "of", "on",
    "optimize", "optimizer_costs", "option", "optionally", "order", "out", "outer", "outfile",
    "over", "partition", "percent_rank", "precision", "primary", "procedure", "purge",
    "range", "rank", "read", "read_write", "reads", "real", "recursive", "references",
    "release", "rename", "repeat", "replace", "require", "resignal", "restrict", "return",
    "revoke", "right", "row_number", "rows", "schema", "schemas", "second_microsecond",
    "select", "sensitive", "separator", "set", "show", "signal", "smallint", "spatial",
    "specific", "sql", "sql_big_result", "sql_calc_found_rows", "sql_small_result",
    "sqlexception", "sqlstate", "sqlwarning", "ssl", "starting", "stored", "straight_join",
    "system", "table", "terminated", "then", "tinyblob", "tinyint", "tinytext", "to",
    "trailing", "trigger", "undo", "union", "unique", "unlock", "unsigned", "update", "usage",
    "use", "using", "utc_date", "utc_time", "utc_timestamp", "values", "varbinary",
    "varchar", "varcharacter", "varying", "virtual", "when", "where", "while", "window",
    "with", "write", "year_month", "zerofill",
];

pub const KEYWORDS: &[&str] = &[
    "action", "after", "against", "aggregate", "algorithm", "always", "any", "ascii", "at",
    "auto_increment", "avg_row_length", "begin", "binlog", "bit", "block", "bool", "boolean",
    "btree", "cache", "cascaded", "chain", "changed", "channel", "charset", "checksum",
    "cipher", "client", "close", "coalesce", "code", "collation", "column_format", "columns",
    "comment", "commit", "committed", "compact", "completion", "compressed", "compression",
    "concurrent", "connection", "consistent", "contains", "context", "cpu", "current", "data",
    "date", "datetime", "day", "deallocate", "definer", "delay_key_write", "directory",
    "disable", "discard", "disk", "do", "dumpfile", "duplicate", "dynamic", "enable", "end",
    "ends", "engine", "engines", "enum", "error", "errors", "escape", "event", "events",
    "every", "exchange", "execute", "expansion", "expire", "export", "extended", "fast",
    "faults", "fields", "file", "filter", "first", "fixed", "flush", "following", "follows",
    "format", "found", "full", "general", "geometry", "global", "grants", "handler", "hash",
    "help", "host", "hosts", "hour", "identified", "import", "indexes", "install", "instance",
    "invisible", "invoker", "io", "ipc", "isolation", "issuer", "json", "key_block_size",
    "language", "last", "leaves", "less", "level", "linestring", "list", "local", "locked",
    "locks", "logfile", "logs", "master", "max_rows", "microsecond", "minute", "mode",
    "modify", "month", "multilinestring", "multipoint", "multipolygon", "mutex", "name",
    "names", "national", "nchar", "never", "new", "next", "no", "nowait",
    "nulls", "number", "nvarchar", "offset", "old", "one", "only", "open", "optional",
    "options", "others", "owner", "pack_keys", "page", "parser", "partial", "partitioning",
    "partitions", "password", "persist", "persist_only", "phase", "plugin", "plugins",
    "point", "polygon", "port", "preceding", "prepare", "preserve", "prev", "privileges",
    "process", "processlist", "profile", "profiles", "proxy", "quarter", "query", "quick",
    "read_only", "rebuild", "recover", "redundant", "relay", "reload", "remove",
    "reorganize", "repair", "repeatable", "replica", "replicas", "replication", "reset",
    "restart", "restore", "resume", "retain", "returns", "reverse", "role", "rollback",
    "rollup", "rotate", "routine", "row", "row_count", "row_format", "rtree", "savepoint",
    "schedule", "second", "security", "serial", "serializable", "server", "session", "share",
    "shutdown", "signed", "simple", "skip", "slave", "slow", "snapshot", "socket", "some",
    "soname", "source", "sql_buffer_result", "sql_cache", "sql_no_cache", "sql_thread",
    "start", "starts", "status", "stop", "storage", "string", "subject", "subpartition",
    "subpartitions", "super", "suspend", "swaps", "switches", "table_checksum", "tables",
    "tablespace", "temporary", "temptable", "text", "than", "thread_priority", "ties", "time",
    "timestamp", "timestampadd", "timestampdiff", "transaction", "triggers", "truncate",
    "type", "types", "unbounded", "uncommitted", "undefined", "unicode", "uninstall",
    "unknown", "until", "upgrade", "user", "value", "variables", "view", "visible", "wait",
    "warnings", "week", "weight_string", "without", "work", "wrapper", "x509", "xa", "xid",
    "xml", "year", "zone",
];

pub const FUNCTIONS: &[&str] = &[
    "abs", "acos", "adddate", "addtime", "aes_decrypt", "aes_encrypt", "any_value", "ascii",
    "asin", "atan", "atan2", "avg", "benchmark", "bin", "bit_and", "bit_count", "bit_length",
    "bit_or", "bit_xor", "cast", "ceil", "ceiling", "char", "char_length",
    "character_length", "charset", "coalesce", "coercibility", "collation", "compress",
    "concat", "concat_ws", "connection_id", "conv", "convert", "convert_tz", "cos", "cot",
    "count", "crc32", "cume_dist", "curdate", "current_date", "current_role", "current_time",
    "current_timestamp", "current_user", "curtime", "database", "date", "date_add",
    "date_format", "date_sub", "datediff", "day", "dayname", "dayofmonth", "dayofweek",
    "dayofyear", "default", "degrees", "dense_rank", "elt", "exp", "export_set", "extract",
    "field", "find_in_set", "first_value", "floor", "format", "found_rows", "from_base64",
    "from_days", "from_unixtime", "get_format", "get_lock", "greatest", "group_concat", "hex",
    "hour", "if", "ifnull", "inet_aton", "inet_ntoa", "insert", "instr", "is_free_lock",
    "is_used_lock", "isnull", "json_array", "json_arrayagg", "json_contains",
    "json_extract", "json_keys", "json_length", "json_object", "json_objectagg",
    "json_quote", "json_remove", "json_set", "json_type", "json_unquote", "json_valid",
    "lag", "last_day", "last_insert_id", "last_value", "lcase", "lead", "least", "left",
    "length", "ln", "load_file", "localtime", "localtimestamp", "locate", "log", "log10",
    "log2", "lower", "lpad", "ltrim", "make_set", "makedate", "maketime", "max", "md5", "mid",
    "min", "minute", "mod", "month", "monthname", "now", "nth_value", "ntile", "nullif", "oct",
    "octet_length", "ord", "password", "percent_rank", "period_add", "period_diff", "pi",
    "position", "pow", "power", "quarter", "quote", "radians", "rand", "random_bytes", "rank",
    "regexp_instr", "regexp_like", "regexp_replace", "regexp_substr", "release_lock",
    "repeat", "replace", "reverse", "right", "round", "row_count", "row_number", "rpad",
    "rtrim", "schema", "sec_to_time", "second", "session_user", "sha", "sha1", "sha2", "sign",
    "sin", "sleep", "soundex", "space", "sqrt", "std", "stddev", "stddev_pop", "stddev_samp",
    "str_to_date", "strcmp", "subdate", "substr", "substring", "substring_index", "subtime",
    "sum", "sysdate", "system_user", "tan", "time", "time_format", "time_to_sec", "timediff",
    "timestamp", "timestampadd", "timestampdiff", "to_base64", "to_days", "to_seconds",
    "trim", "truncate", "ucase", "uncompress", "unhex", "unix_timestamp", "upper", "user",
    "utc_date", "utc_time", "utc_timestamp", "uuid", "uuid_short", "values", "var_pop",
    "var_samp", "variance", "version", "week", "weekday", "weekofyear", "weight_string",
    "year", "yearweek",
];

/// Units accepted after `INTERVAL expr`.
pub const INTERVAL_UNITS: &[&str] = &[
    "microsecond", "second", "minute", "hour", "day", "week", "month", "quarter", "year",
    "second_microsecond", "minute_microsecond", "minute_second", "hour_microsecond",
    "hour_second", "hour_minute", "day_microsecond", "day_second", "day_minute", "day_hour",
    "year_month",
];

fn table(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static LITERAL_SET: LazyLock<HashSet<&str>> = LazyLock::new(|| table(LITERALS));
static OPERATOR_SET: LazyLock<HashSet<&str>> = LazyLock::new(|| table(WORD_OPERATORS));
static RESERVED_SET: LazyLock<HashSet<&str>> = LazyLock::new(|| table(RESERVED));
static KEYWORD_SET: LazyLock<HashSet<&str>> = LazyLock::new(|| table(KEYWORDS));
static FUNCTION_SET: LazyLock<HashSet<&str>> = LazyLock::new(|| table(FUNCTIONS));
static UNIT_SET: LazyLock<HashSet<&str>> = LazyLock::new(|| table(INTERVAL_UNITS));

/// Classify an identifier-like lexeme. Case-insensitive, never fails: unknown
/// words are plain names.
pub fn classify(word: &str) -> TokenKind {
    let lower = word.to_ascii_lowercase();
    let lower = lower.as_str();
    if LITERAL_SET.contains(lower) {
        TokenKind::Literal(LiteralClass::Constant)
    } else if OPERATOR_SET.contains(lower) {
        TokenKind::Operator(OperatorClass::Word)
    } else if RESERVED_SET.contains(lower) {
        TokenKind::Keyword(KeywordClass::Reserved)
    } else if KEYWORD_SET.contains(lower) {
        TokenKind::Keyword(KeywordClass::NonReserved)
    } else if FUNCTION_SET.contains(lower) {
        TokenKind::Name(NameClass::Builtin)
    } else {
        TokenKind::Name(NameClass::Other)
    }
}

/// True if `word` names a builtin function, whatever table classified it first.
pub fn is_function_name(word: &str) -> bool {
    FUNCTION_SET.contains(word.to_ascii_lowercase().as_str())
}

pub fn is_reserved(word: &str) -> bool {
    RESERVED_SET.contains(word.to_ascii_lowercase().as_str())
}

pub fn is_interval_unit(word: &str) -> bool {
    UNIT_SET.contains(word.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("NULL", TokenKind::Literal(LiteralClass::Constant))]
    #[case("true", TokenKind::Literal(LiteralClass::Constant))]
    #[case("And", TokenKind::Operator(OperatorClass::Word))]
    #[case("MOD", TokenKind::Operator(OperatorClass::Word))]
    #[case("select", TokenKind::Keyword(KeywordClass::Reserved))]
    #[case("LEFT", TokenKind::Keyword(KeywordClass::Reserved))]
    #[case("names", TokenKind::Keyword(KeywordClass::NonReserved))]
    #[case("Day", TokenKind::Keyword(KeywordClass::NonReserved))]
    #[case("concat", TokenKind::Name(NameClass::Builtin))]
    #[case("actor_id", TokenKind::Name(NameClass::Other))]
    fn classifies_in_priority_order(#[case] word: &str, #[case] kind: TokenKind) {
        assert_eq!(classify(word), kind);
    }

    #[test]
    fn overlapping_words_are_still_functions() {
        for word in ["left", "IF", "replace", "day", "mod"] {
            assert!(is_function_name(word), "{word} should be a function name");
        }
        assert!(!is_function_name("from"));
    }

    #[test]
    fn interval_units() {
        assert!(is_interval_unit("DAY"));
        assert!(is_interval_unit("year_month"));
        assert!(!is_interval_unit("days"));
    }

    #[test]
    fn tables_are_lowercase() {
        for word in LITERALS
            .iter()
            .chain(WORD_OPERATORS)
            .chain(INTERVAL_UNITS)
            .chain(RESERVED)
            .chain(KEYWORDS)
            .chain(FUNCTIONS)
        {
            assert_eq!(*word, word.to_ascii_lowercase(), "{word} must be stored lowercase");
        }
    }
}
