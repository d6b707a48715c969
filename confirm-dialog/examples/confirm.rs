//! Confirmation dialogs on a terminal.
//!
//! Tab moves between the actions, Enter/Space activates, Escape or a click
//! outside the dialog cancels, `y`/`n` answer directly. Ctrl-C quits.

use std::fs::File;

use confirm_dialog::prelude::*;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

fn page(status: &str) -> Element {
    Element::col()
        .padding(1)
        .gap(1)
        .child(Element::text("Branches").role(Role::Heading))
        .child(Element::text("feature/confirm-dialog"))
        .child(Element::text(status.to_string()).id("status"))
}

#[tokio::main]
async fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("confirm.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let session = Session::new(page("Waiting for an answer..."));
    let cx = session.context();
    let confirm = cx.use_confirm();

    let task = async move {
        let publish = confirm(
            ConfirmOptions::new("Publish branch", "Push feature/confirm-dialog to the remote?")
                .confirm_button_content("Publish")
                .confirm_button_type(ConfirmButtonType::Primary),
        )
        .await;

        cx.set_page(page(if publish { "Published." } else { "Not published." }));

        let delete = confirm(
            ConfirmOptions::new("Delete branch", "This cannot be undone.")
                .cancel_button_content("Keep")
                .confirm_button_content("Delete")
                .confirm_button_type(ConfirmButtonType::Danger),
        )
        .await;

        (publish, delete)
    };

    match confirm_dialog::run(session, task).await {
        Ok((publish, delete)) => println!("publish: {publish}, delete: {delete}"),
        Err(e) => eprintln!("Error: {}", e),
    }
}
