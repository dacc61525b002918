#![no_main]

use libfuzzer_sys::fuzz_target;
use wincall_core::{resolve, Dialect, ResolveOptions, ResolveRequest};

fuzz_target!(|data: &[u8]| {
    let Some((&flag, rest)) = data.split_first() else {
        return;
    };
    if let Ok(sql) = std::str::from_utf8(rest) {
        let dialect = if flag & 1 == 0 {
            Dialect::Generic
        } else {
            Dialect::Postgres
        };
        let request = ResolveRequest::new(sql)
            .with_dialect(dialect)
            .with_options(ResolveOptions {
                abandon_statement_on_error: Some(flag & 2 == 0),
            });

        let result = resolve(&request);
        assert_eq!(result.summary.call_count, result.calls().count());
    }
});
