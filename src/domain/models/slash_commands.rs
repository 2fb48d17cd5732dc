#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args: args
                .into_iter()
                .filter(|e| return !e.trim().is_empty())
                .collect(),
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_new()
            || cmd.is_select()
            || cmd.is_rename()
            || cmd.is_delete()
            || cmd.is_copy_code_block()
            || cmd.is_copy_chat()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back together, for commands taking free text.
    pub fn rest(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_new(&self) -> bool {
        return ["/n", "/new"].contains(&self.command.as_str());
    }

    pub fn is_select(&self) -> bool {
        return ["/s", "/select"].contains(&self.command.as_str());
    }

    pub fn is_rename(&self) -> bool {
        return ["/r", "/rename"].contains(&self.command.as_str());
    }

    pub fn is_delete(&self) -> bool {
        return ["/d", "/delete"].contains(&self.command.as_str());
    }

    pub fn is_copy_code_block(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str()) && !self.args.is_empty();
    }

    pub fn is_copy_chat(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str()) && self.args.is_empty();
    }
}
