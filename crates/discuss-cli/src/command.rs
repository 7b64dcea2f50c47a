//! Line commands understood by the terminal front end.

use std::str::FromStr;

use discuss_core::{FieldValues, Handle};

use crate::{Error, FormCollaborator, Outcome, Result, Session};

pub const HELP: &str = "\
commands:
  show [HANDLE]          print the page, or one entity's rendering
  click HANDLE ACTION    activate ACTION (e.g. upVote, addComment) on HANDLE
  submit JSON            submit the open form, e.g. submit {\"name\": \"Ana\"}
  cancel                 close the open form without adding anything
  labels                 label child-list containers
  help                   show this text
  quit                   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Show(Option<Handle>),
  Click { target: Handle, action: String },
  Submit(FieldValues),
  Cancel,
  Labels,
  Help,
  Quit,
}

/// What to tell the user after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
  Text(String),
  Quit,
}

impl FromStr for Command {
  type Err = Error;

  fn from_str(line: &str) -> Result<Self> {
    let line = line.trim();
    let (word, rest) = line
      .split_once(char::is_whitespace)
      .map(|(w, r)| (w, r.trim()))
      .unwrap_or((line, ""));

    let invalid = || Error::InvalidCommand(line.to_string());
    match word {
      "show" if rest.is_empty() => Ok(Self::Show(None)),
      "show" => Ok(Self::Show(Some(rest.parse()?))),
      "click" => {
        let (target, action) = rest.split_once(char::is_whitespace).ok_or_else(invalid)?;
        Ok(Self::Click {
          target: target.parse()?,
          action: action.trim().to_string(),
        })
      }
      "submit" => Ok(Self::Submit(serde_json::from_str(rest)?)),
      "cancel" if rest.is_empty() => Ok(Self::Cancel),
      "labels" if rest.is_empty() => Ok(Self::Labels),
      "help" | "?" => Ok(Self::Help),
      "quit" | "exit" | "q" => Ok(Self::Quit),
      _ => Err(invalid()),
    }
  }
}

impl Command {
  pub fn execute<F: FormCollaborator>(
    self,
    session: &mut Session<F>,
  ) -> Result<Response> {
    let text = match self {
      Self::Show(None) => session.page().to_markup()?,
      Self::Show(Some(handle)) => {
        session.tree().resolve(handle)?;
        let path = session
          .page()
          .find(handle)
          .ok_or(discuss_markup::Error::NotRendered(handle))?;
        match session.page().element(&path) {
          Some(el) => el.to_markup()?,
          None => return Err(discuss_markup::Error::NotRendered(handle).into()),
        }
      }
      Self::Click { target, action } => {
        describe(session.click_action(target, &action)?)
      }
      Self::Submit(values) => {
        let submitted = session.submit(values)?;
        match submitted.focus {
          Some(focus) => format!(
            "added; re-rendered at {}, focus on {focus}",
            submitted.path
          ),
          None => format!("added; re-rendered at {}", submitted.path),
        }
      }
      Self::Cancel => {
        if session.cancel() {
          "form closed".to_string()
        } else {
          "no form is open".to_string()
        }
      }
      Self::Labels => {
        let root = session.tree().root();
        describe(session.click_action(root, "addContainerLabels")?)
      }
      Self::Help => HELP.to_string(),
      Self::Quit => return Ok(Response::Quit),
    };
    Ok(Response::Text(text))
  }
}

fn describe(outcome: Outcome) -> String {
  match outcome {
    Outcome::Ignored => "nothing to do".to_string(),
    Outcome::Replaced { target, path } => {
      format!("updated {target}; re-rendered at {path}")
    }
    Outcome::Labelled => "containers labelled".to_string(),
    Outcome::FormOpened { target, action } => {
      format!("{action} on {target}: fill in the form, then `submit` or `cancel`")
    }
  }
}
