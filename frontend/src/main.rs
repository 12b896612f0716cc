use std::rc::Rc;

use log::{error, info, warn};
use yew::prelude::*;

mod chat;
mod config;
mod faq;
mod components {
    pub mod chat_widget;
}

use components::chat_widget::ChatWidget;
use config::ChatConfig;
use faq::KnowledgeBase;

#[function_component]
fn App() -> Html {
    let knowledge_base = use_memo(
        |_| match config::load_knowledge_base() {
            Ok(kb) => {
                if kb.is_empty() {
                    warn!("Knowledge base has no entries, every question gets the fallback");
                } else {
                    info!("Loaded {} FAQ entries", kb.len());
                }
                kb
            }
            Err(e) => {
                // The widget still answers everything with the fallback.
                error!("Could not load knowledge base: {}", e);
                KnowledgeBase::new()
            }
        },
        (),
    );

    html! {
        <div class="softsell">
            <ChatWidget knowledge_base={Rc::clone(&knowledge_base)} config={ChatConfig::default()} />
        </div>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::get_log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
