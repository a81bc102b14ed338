// SPDX-License-Identifier: MPL-2.0
use eventlens::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap(),
        api_url: args.opt_value_from_str("--api-url").unwrap(),
        data_dir: args.opt_value_from_str("--data-dir").unwrap(),
        config_dir: args.opt_value_from_str("--config-dir").unwrap(),
        event_id: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}
