pub mod app;
pub mod config;
pub mod console;

pub mod common {
    pub mod clock;
    pub mod error;
    pub mod event;
    pub mod money;
}

pub mod domain {
    pub mod account;
    pub mod ledger;
    pub mod log_chain;
    pub mod registry;
}

pub mod io {
    pub mod codec;
    pub mod storage;
    pub mod writer;
}

pub mod worker {
    pub mod processor;

    pub mod handlers {
        pub mod change_pin;
        pub mod close;
        pub mod deposit;
        pub mod edit;
        pub mod open;
        pub mod query;
        pub mod transfer;
        pub mod withdrawal;

        #[cfg(test)]
        pub(crate) mod fixtures;
    }
}
