use colored::Colorize;

pub struct Theme {
    pub prompt: String,
    pub farewell: String,
    pub error_style: Box<dyn Fn(String) -> String>,
    pub success_style: Box<dyn Fn(String) -> String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prompt: "myshell> ".bright_cyan().to_string(),
            farewell: String::from("GoodBye"),
            error_style: Box::new(|s| s.bright_red().to_string()),
            success_style: Box::new(|s| s.bright_green().to_string()),
        }
    }
}

impl Theme {
    pub fn load(theme_name: &str) -> Theme {
        match theme_name {
            "dark" => Theme {
                prompt: "myshell ➤ ".bright_purple().to_string(),
                farewell: String::from("GoodBye"),
                error_style: Box::new(|s| s.red().to_string()),
                success_style: Box::new(|s| s.magenta().to_string()),
            },
            _ => Theme::default(),
        }
    }
}
