//! Parsing of `git remote -v` output.

use serde::Serialize;

/// Fetch and push URLs of a remote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoteRefs {
    pub fetch: String,
    pub push: String,
}

/// A named remote as reported by git
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteBinding {
    pub name: String,
    pub refs: RemoteRefs,
}

/// Parse `git remote -v` output, preserving first-seen order.
///
/// Lines look like `origin\thttps://host/repo.git (fetch)`. Lines that do not
/// follow that shape are skipped.
pub fn parse_remotes(output: &str) -> Vec<RemoteBinding> {
    let mut remotes: Vec<RemoteBinding> = Vec::new();

    for line in output.lines() {
        let Some((name, rest)) = line.split_once(['\t', ' ']) else {
            continue;
        };
        let rest = rest.trim();
        let (url, kind) = match rest.rsplit_once(' ') {
            Some((url, kind)) => (url.trim(), kind),
            None => continue,
        };

        let idx = match remotes.iter().position(|r| r.name == name) {
            Some(idx) => idx,
            None => {
                remotes.push(RemoteBinding {
                    name: name.to_string(),
                    refs: RemoteRefs::default(),
                });
                remotes.len() - 1
            }
        };
        let refs = &mut remotes[idx].refs;

        match kind {
            "(fetch)" => refs.fetch = url.to_string(),
            "(push)" => refs.push = url.to_string(),
            _ => {}
        }
    }

    remotes
}
