use anyhow::Result;

use super::{PageController, PageEvent, CREATE_USER, HOME};
use crate::controls::{fields_match, require_filled};
use crate::host::{Document, Host};
use crate::state::Context;

pub struct CreateUser {
    context: Context,
}

impl CreateUser {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    fn submit(&self, host: &mut dyn Host) -> Result<()> {
        let Some(user) = require_filled(host, "user", "You must enter a user name")? else {
            return Ok(());
        };
        if !fields_match(host, "pass", "pass_check", "Passwords don't match")? {
            return Ok(());
        }

        tracing::info!("Created user {}", user);
        self.context.add_user(&user);
        host.navigate(HOME);
        Ok(())
    }
}

impl PageController for CreateUser {
    fn id(&self) -> &'static str {
        CREATE_USER
    }

    fn title(&self) -> &'static str {
        "Create User"
    }

    fn layout(&self) -> Document {
        Document::new(self.title())
            .field("user", "User name")
            .secret("pass", "Password")
            .secret("pass_check", "Repeat password")
            .button("submit", "Create")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        if let PageEvent::Click(id) = event {
            if id == "submit" {
                self.submit(host)?;
            }
        }
        Ok(())
    }
}
