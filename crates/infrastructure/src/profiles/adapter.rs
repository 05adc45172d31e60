use sots_domain::config::PathsConfig;
use std::path::{Path, MAIN_SEPARATOR};

/// Turns a stored profile (plain argument list or batch script) into a single
/// argument line with installation paths substituted.
#[derive(Debug, Clone)]
pub struct ProfileAdapter {
    whitelist_dir: String,
    bin_dir: String,
    tls_fake_bin: String,
    game_filter: String,
    executable_name: String,
}

impl ProfileAdapter {
    pub fn new(paths: &PathsConfig, executable_name: &str) -> Self {
        Self {
            whitelist_dir: dir_with_separator(&paths.whitelist_dir()),
            bin_dir: dir_with_separator(&paths.bin_dir()),
            tls_fake_bin: paths.tls_fake_bin().display().to_string(),
            game_filter: paths.game_filter.clone(),
            executable_name: executable_name.to_string(),
        }
    }

    pub fn adapt(&self, content: &str) -> String {
        let joined = join_lines(content);
        let body = self.cut_before_executable(&joined);
        let substituted = self.substitute(body);
        strip_leading_executable(&substituted, &self.executable_name).to_string()
    }

    fn cut_before_executable<'a>(&self, content: &'a str) -> &'a str {
        let exe = format!("%BIN%{}", self.executable_name);
        let candidates = [
            format!("\"{}\" ", exe),
            format!("\"{}\"", exe),
            format!("{} ", exe),
            exe,
        ];
        candidates
            .iter()
            .find_map(|c| content.find(c.as_str()))
            .map(|index| &content[index..])
            .unwrap_or(content)
    }

    fn substitute(&self, content: &str) -> String {
        content
            .replace("%LISTS%", &self.whitelist_dir)
            .replace("%LIST_PATH%", &self.whitelist_dir)
            .replace("%BIN%", &self.bin_dir)
            .replace("%IANA%", &self.tls_fake_bin)
            .replace("%GameFilter%", &self.game_filter)
    }
}

fn dir_with_separator(dir: &Path) -> String {
    let mut s = dir.display().to_string();
    if !s.ends_with(MAIN_SEPARATOR) {
        s.push(MAIN_SEPARATOR);
    }
    s
}

/// Joins non-empty lines with single spaces, dropping `^` continuations.
fn join_lines(content: &str) -> String {
    content
        .lines()
        .map(|line| line.trim().trim_end_matches('^').trim_end())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_leading_executable<'a>(content: &'a str, executable_name: &str) -> &'a str {
    let content = content.trim();
    let exe = executable_name.to_ascii_lowercase();

    let (token, rest) = if let Some(quoted) = content.strip_prefix('"') {
        match quoted.find('"') {
            Some(end) => (&quoted[..end], &quoted[end + 1..]),
            None => return content,
        }
    } else {
        match content.find(char::is_whitespace) {
            Some(end) => (&content[..end], &content[end..]),
            None => (content, ""),
        }
    };

    if token.to_ascii_lowercase().ends_with(&exe) {
        rest.trim_start()
    } else {
        content
    }
}
