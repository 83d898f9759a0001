//! Shell integration scripts. `fcd init <shell>` prints a wrapper function
//! `f` that runs the binary and changes into the directory it prints.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

const POSIX_SCRIPT: &str = r#"# fcd shell integration. Add `eval "$(fcd init bash)"` to your shell rc.
f() {
    local target
    target="$(fcd "$@")" && cd "$target"
}
"#;

const FISH_SCRIPT: &str = r#"# fcd shell integration. Add `fcd init fish | source` to your config.fish.
function f --description 'jump to a fuzzily matched directory'
    set -l target (fcd $argv)
    and cd $target
end
"#;

/// Returns the integration script for the given shell.
pub fn init_script(shell: Shell) -> &'static str {
    match shell {
        Shell::Bash | Shell::Zsh => POSIX_SCRIPT,
        Shell::Fish => FISH_SCRIPT,
    }
}
