#![deny(missing_docs)]

//! # Wrapper Emission
//!
//! Serializes parsed procedure metadata into one complete Rust module per
//! schema. Output is built in an accumulating buffer with a fixed section
//! order (preamble, then one call/call-with-result pair per procedure in
//! input order, then the shared transaction and rebinding helpers), so the
//! same input always yields byte-identical text.
//!
//! Parameters and result columns carry no reliable type metadata in the
//! catalog, so generated signatures pass everything as [`mysql::Value`] and
//! leave typing to the caller.

use crate::catalog::ProcedureInfo;
use crate::naming::{to_pascal_identifier, to_snake_identifier};

/// Marker prepended to every generated file.
pub const GENERATED_HEADER: &str = "// Generated by procgen. DO NOT EDIT.";

/// File name of the per-schema artifact.
pub const ARTIFACT_FILE_NAME: &str = "procedures.rs";

/// Generates the complete wrapper module for `schema`.
///
/// Procedures are emitted in the order given; the catalog reader supplies
/// them name-ordered, which makes repeated runs reproducible.
pub fn emit_procedure_module(schema: &str, procedures: &[ProcedureInfo]) -> String {
    let caller = format!("{}Procedures", to_pascal_identifier(schema));
    let mut code = String::new();

    // 1. Preamble: marker, module docs, imports.
    code.push_str(GENERATED_HEADER);
    code.push_str("\n\n");
    code.push_str(&format!(
        "//! Stored procedure wrappers for the `{}` schema.\n",
        schema
    ));
    code.push_str("//!\n");
    code.push_str("//! One call/call-with-result pair per catalog procedure. Parameters and\n");
    code.push_str("//! result columns are untyped [`Value`]s; typing is left to the caller.\n\n");
    code.push_str("use std::collections::HashMap;\n\n");
    code.push_str("use mysql::prelude::Queryable;\n");
    code.push_str("use mysql::{Error, Pool, PooledConn, Transaction, TxOpts, Value};\n\n");

    // 2. Caller type and constructor.
    code.push_str(&format!(
        "/// Issues `CALL` statements against the `{}` schema.\n",
        schema
    ));
    code.push_str(&format!("pub struct {} {{\n", caller));
    code.push_str("    pool: Pool,\n");
    code.push_str("}\n\n");
    code.push_str(&format!("impl {} {{\n", caller));
    code.push_str("    /// Creates a caller backed by `pool`.\n");
    code.push_str("    pub fn new(pool: Pool) -> Self {\n");
    code.push_str("        Self { pool }\n");
    code.push_str("    }\n\n");
    code.push_str("    /// Checks out a connection to use as the execution context for calls.\n");
    code.push_str("    pub fn conn(&self) -> Result<PooledConn, Error> {\n");
    code.push_str("        self.pool.get_conn()\n");
    code.push_str("    }\n\n");

    // 3. Per-procedure pairs, input order.
    for procedure in procedures {
        emit_call_pair(&mut code, procedure);
    }

    // 4. Shared helpers.
    code.push_str("    /// Runs `f` with this caller and a transaction-bound execution context.\n");
    code.push_str("    ///\n");
    code.push_str("    /// Commits when `f` returns `Ok` and rolls back when it returns `Err`;\n");
    code.push_str("    /// failures of the transaction manager itself are returned as-is.\n");
    code.push_str("    pub fn transaction<T, F>(&self, f: F) -> Result<T, Error>\n");
    code.push_str("    where\n");
    code.push_str("        F: FnOnce(&Self, &mut Transaction<'_>) -> Result<T, Error>,\n");
    code.push_str("    {\n");
    code.push_str("        let mut conn = self.pool.get_conn()?;\n");
    code.push_str("        let mut tx = conn.start_transaction(TxOpts::default())?;\n");
    code.push_str("        match f(self, &mut tx) {\n");
    code.push_str("            Ok(value) => {\n");
    code.push_str("                tx.commit()?;\n");
    code.push_str("                Ok(value)\n");
    code.push_str("            }\n");
    code.push_str("            Err(err) => {\n");
    code.push_str("                tx.rollback()?;\n");
    code.push_str("                Err(err)\n");
    code.push_str("            }\n");
    code.push_str("        }\n");
    code.push_str("    }\n\n");
    code.push_str("    /// Returns a caller bound to `pool`, leaving this instance untouched.\n");
    code.push_str("    pub fn with_pool(&self, pool: Pool) -> Self {\n");
    code.push_str("        Self { pool }\n");
    code.push_str("    }\n");
    code.push_str("}\n");

    code
}

/// Emits the call and call-with-result wrappers for one procedure.
fn emit_call_pair(code: &mut String, procedure: &ProcedureInfo) {
    let fn_name = to_snake_identifier(&procedure.name);
    let args: Vec<String> = procedure
        .parameters
        .iter()
        .map(|p| format!("{}: Value", to_snake_identifier(p)))
        .collect();
    let arg_names: Vec<String> = procedure
        .parameters
        .iter()
        .map(|p| to_snake_identifier(p))
        .collect();
    let placeholders = vec!["?"; procedure.parameters.len()].join(", ");
    let call = format!("CALL {}({})", procedure.name, placeholders);

    let arg_list = if args.is_empty() {
        String::new()
    } else {
        format!(", {}", args.join(", "))
    };

    // Invoke: fire the call, discard any result sets.
    code.push_str(&format!(
        "    /// Calls the `{}` stored procedure.\n",
        procedure.name
    ));
    code.push_str(&format!(
        "    pub fn {}<C: Queryable>(&self, conn: &mut C{}) -> Result<(), Error> {{\n",
        fn_name, arg_list
    ));
    if procedure.parameters.is_empty() {
        code.push_str(&format!("        conn.query_drop(\"{}\")\n", call));
    } else {
        code.push_str(&format!(
            "        conn.exec_drop(\"{}\", vec![{}])\n",
            call,
            arg_names.join(", ")
        ));
    }
    code.push_str("    }\n\n");

    // InvokeWithResult: same argument contract, rows folded into
    // column-name maps.
    code.push_str(&format!(
        "    /// Calls the `{}` stored procedure and collects every result row.\n",
        procedure.name
    ));
    code.push_str(&format!(
        "    pub fn {}_with_result<C: Queryable>(&self, conn: &mut C{}) -> Result<Vec<HashMap<String, Value>>, Error> {{\n",
        fn_name, arg_list
    ));
    if procedure.parameters.is_empty() {
        code.push_str(&format!(
            "        let result = conn.query_iter(\"{}\")?;\n",
            call
        ));
    } else {
        code.push_str(&format!(
            "        let result = conn.exec_iter(\"{}\", vec![{}])?;\n",
            call,
            arg_names.join(", ")
        ));
    }
    code.push_str("        let mut rows = Vec::new();\n");
    code.push_str("        for row in result {\n");
    code.push_str("            let row = row?;\n");
    code.push_str("            let columns = row.columns();\n");
    code.push_str("            let mut record = HashMap::with_capacity(columns.len());\n");
    code.push_str("            for (index, column) in columns.iter().enumerate() {\n");
    code.push_str(
        "                let value = row.as_ref(index).cloned().unwrap_or(Value::NULL);\n",
    );
    code.push_str("                record.insert(column.name_str().into_owned(), value);\n");
    code.push_str("            }\n");
    code.push_str("            rows.push(record);\n");
    code.push_str("        }\n");
    code.push_str("        Ok(rows)\n");
    code.push_str("    }\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn proc_info(name: &str, parameters: &[&str]) -> ProcedureInfo {
        ProcedureInfo {
            name: name.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            definition: String::new(),
        }
    }

    #[test]
    fn test_invoke_pair_signatures() {
        let code = emit_procedure_module("fish", &[proc_info("add_user", &["p_name", "p_age"])]);

        assert!(code.contains(
            "pub fn add_user<C: Queryable>(&self, conn: &mut C, p_name: Value, p_age: Value) -> Result<(), Error>"
        ));
        assert!(code.contains(
            "pub fn add_user_with_result<C: Queryable>(&self, conn: &mut C, p_name: Value, p_age: Value) -> Result<Vec<HashMap<String, Value>>, Error>"
        ));
        // Placeholder count matches parameter count exactly.
        assert!(code.contains("\"CALL add_user(?, ?)\", vec![p_name, p_age]"));
    }

    #[test]
    fn test_zero_parameter_call_form() {
        let code = emit_procedure_module("fish", &[proc_info("noop", &[])]);

        assert!(code.contains("pub fn noop<C: Queryable>(&self, conn: &mut C) -> Result<(), Error>"));
        assert!(code.contains("conn.query_drop(\"CALL noop()\")"));
        assert!(code.contains("conn.query_iter(\"CALL noop()\")?"));
        assert!(!code.contains("CALL noop(?"));
    }

    #[test]
    fn test_preamble_and_helpers() {
        let code = emit_procedure_module("order_db", &[]);

        assert!(code.starts_with(GENERATED_HEADER));
        assert!(code.contains("//! Stored procedure wrappers for the `order_db` schema."));
        assert!(code.contains("pub struct OrderDbProcedures {"));
        assert!(code.contains("pub fn new(pool: Pool) -> Self"));
        assert!(code.contains("pub fn transaction<T, F>(&self, f: F) -> Result<T, Error>"));
        assert!(code.contains("pub fn with_pool(&self, pool: Pool) -> Self"));
    }

    #[test]
    fn test_emission_is_deterministic() {
        let procedures = vec![
            proc_info("add_user", &["p_name", "p_age"]),
            proc_info("count_fish", &[]),
        ];
        let first = emit_procedure_module("fish", &procedures);
        let second = emit_procedure_module("fish", &procedures);
        assert_eq!(first, second);
    }

    #[test]
    fn test_procedures_keep_input_order() {
        let procedures = vec![proc_info("alpha", &[]), proc_info("beta", &[])];
        let code = emit_procedure_module("fish", &procedures);

        let alpha = code.find("pub fn alpha").unwrap();
        let beta = code.find("pub fn beta").unwrap();
        assert!(alpha < beta);
        // Helpers come after every pair.
        let tx = code.find("pub fn transaction").unwrap();
        assert!(beta < tx);
    }

    #[test]
    fn test_generated_module_parses_as_rust() {
        let procedures = vec![
            proc_info("add_user", &["p_name", "p_age"]),
            proc_info("noop", &[]),
        ];
        let code = emit_procedure_module("fish", &procedures);
        syn::parse_file(&code).expect("generated module should parse");
    }
}
