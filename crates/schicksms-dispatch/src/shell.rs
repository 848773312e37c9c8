// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! POSIX shell quoting.
//!
//! Only used when the injector has to go through `sh -c` (for example a
//! `sudo` wrapper configured as a single string). Every argument is wrapped
//! in single quotes, which the shell treats as fully literal; embedded single
//! quotes are closed, escaped, and reopened.

/// Quote one argument for `sh`. The empty string becomes `''`.
pub fn quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for c in arg.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Join `argv` into one command line with every element quoted.
pub fn render_command_line(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}
