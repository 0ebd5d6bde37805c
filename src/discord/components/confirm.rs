//! Yes/No prompt.
//!
//! A prompt is split in two halves: [`ConfirmButtons`] goes to whatever
//! listens for button presses, [`PendingConfirmation`] stays with the code
//! waiting on the answer. The first valid press resolves the pending half and
//! stops the buttons from accepting more input. If nothing is pressed within
//! the wait limit the outcome is `None`, which callers must treat as "no
//! action taken" rather than as a decline.

use std::time::Duration;

use poise::serenity_prelude::{ButtonStyle, CreateActionRow, CreateButton};
use tokio::sync::oneshot;

const YES_ID: &str = "confirm:yes";
const NO_ID: &str = "confirm:no";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Ephemeral reply sent to whoever pressed the button.
    pub fn acknowledgement(self) -> &'static str {
        match self {
            Confirmation::Confirmed => "Confirming",
            Confirmation::Declined => "Cancelling",
        }
    }
}

pub fn confirm_prompt() -> (ConfirmButtons, PendingConfirmation) {
    let (tx, rx) = oneshot::channel();
    (
        ConfirmButtons { resolver: Some(tx) },
        PendingConfirmation { receiver: rx },
    )
}

#[derive(Debug)]
pub struct ConfirmButtons {
    resolver: Option<oneshot::Sender<Confirmation>>,
}

impl ConfirmButtons {
    pub fn components() -> Vec<CreateActionRow> {
        vec![CreateActionRow::Buttons(vec![
            CreateButton::new(YES_ID)
                .label("Yes")
                .style(ButtonStyle::Success),
            CreateButton::new(NO_ID)
                .label("No")
                .style(ButtonStyle::Secondary),
        ])]
    }

    fn choice(custom_id: &str) -> Option<Confirmation> {
        match custom_id {
            YES_ID => Some(Confirmation::Confirmed),
            NO_ID => Some(Confirmation::Declined),
            _ => None,
        }
    }

    /// Records a press. Returns the decision for the first press on a known
    /// button, `None` for unknown buttons or once already resolved.
    pub fn press(&mut self, custom_id: &str) -> Option<Confirmation> {
        let choice = Self::choice(custom_id)?;
        let resolver = self.resolver.take()?;
        // The waiting side may have timed out already.
        let _ = resolver.send(choice);
        Some(choice)
    }

    /// Like [`press`](Self::press), but runs `acknowledge` to completion
    /// before the waiting side sees the answer.
    pub async fn answer<F, Fut>(
        &mut self,
        custom_id: &str,
        acknowledge: F,
    ) -> Option<Confirmation>
    where
        F: FnOnce(Confirmation) -> Fut,
        Fut: Future<Output = ()>,
    {
        let choice = Self::choice(custom_id)?;
        if self.resolver.is_none() {
            return None;
        }
        acknowledge(choice).await;
        self.press(custom_id)
    }
}

#[derive(Debug)]
pub struct PendingConfirmation {
    receiver: oneshot::Receiver<Confirmation>,
}

impl PendingConfirmation {
    pub async fn wait(self, limit: Duration) -> Option<Confirmation> {
        match tokio::time::timeout(limit, self.receiver).await {
            Ok(Ok(choice)) => Some(choice),
            _ => None,
        }
    }
}
