/// Name this tool is installed under
pub const PROGRAM: &str = "magnum-complete";

/// Bash glue registering a completion function for `command`
pub struct BashScript {
    command: String,
    program: String,
}

impl BashScript {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            program: PROGRAM.to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Shell identifier derived from the command name
    pub fn function_name(&self) -> String {
        let ident: String = self
            .command
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("_{ident}_complete")
    }

    pub fn generate(&self) -> String {
        let func = self.function_name();
        let coproc = func.to_uppercase();
        let program = shell_quote(&self.program);
        let command = shell_quote(&self.command);

        let mut script = format!("# bash completion for {}, generated by {}\n", self.command, PROGRAM);
        script.push_str(&format!("{func}() {{\n"));
        script.push_str("    COMPREPLY=()\n");
        script.push_str("    local line\n");
        script.push_str(&format!(
            "    if [[ -z \"${{{coproc}_PID:-}}\" ]] || ! kill -0 \"${{{coproc}_PID}}\" 2>/dev/null; then\n"
        ));
        script.push_str(&format!("        coproc {coproc} {{ command {program} serve 2>/dev/null; }}\n"));
        script.push_str("    fi\n");
        script.push_str(&format!("    if [[ -n \"${{{coproc}[1]:-}}\" ]]; then\n"));
        script.push_str("        local IFS=$'\\t'\n");
        script.push_str(&format!(
            "        printf '%s\\t%s\\n' \"$COMP_CWORD\" \"${{COMP_WORDS[*]}}\" >&\"${{{coproc}[1]}}\"\n"
        ));
        script.push_str(&format!("        while IFS= read -r line <&\"${{{coproc}[0]}}\"; do\n"));
        script.push_str("            [[ -z \"$line\" ]] && break\n");
        script.push_str("            COMPREPLY+=(\"$line\")\n");
        script.push_str("        done\n");
        script.push_str("    else\n");
        script.push_str(&format!(
            "        mapfile -t COMPREPLY < <(command {program} complete --cword \"$COMP_CWORD\" -- \"${{COMP_WORDS[@]}}\" 2>/dev/null)\n"
        ));
        script.push_str("    fi\n");
        script.push_str("    return 0\n");
        script.push_str("}\n");
        script.push_str(&format!("complete -F {func} {command}\n"));

        script
    }
}

/// Single-quote `word` unless it is made of safe characters only
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '+'));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name_is_an_identifier() {
        assert_eq!(BashScript::new("magnum").function_name(), "_magnum_complete");
        assert_eq!(BashScript::new("openstack-magnum").function_name(), "_openstack_magnum_complete");
    }

    #[test]
    fn test_script_registers_completion() {
        let script = BashScript::new("magnum").generate();

        assert!(script.contains("_magnum_complete() {"));
        assert!(script.ends_with("complete -F _magnum_complete magnum\n"));
        assert!(script.contains("coproc _MAGNUM_COMPLETE { command magnum-complete serve 2>/dev/null; }"));
        assert!(script.contains("kill -0 \"${_MAGNUM_COMPLETE_PID}\""));
        assert!(script.contains("magnum-complete complete --cword \"$COMP_CWORD\" -- \"${COMP_WORDS[@]}\""));
    }

    #[test]
    fn test_program_path_is_quoted() {
        let script = BashScript::new("magnum").with_program("/opt/my tools/magnum-complete").generate();
        assert!(script.contains("command '/opt/my tools/magnum-complete' serve"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("magnum"), "magnum");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
