pub mod shared {
    pub mod core {
        pub mod clock;
    }
    pub mod infrastructure {
        pub mod key_value_store;
        pub mod persistence_store;
    }
}

pub mod modules {
    pub mod projects {
        pub mod core {
            pub mod ids;
            pub mod listing;
            pub mod normalize;
            pub mod patch;
            pub mod project;
            pub mod task;
            pub mod validation;
        }
        pub mod use_cases {
            pub mod project_lifecycle {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod track_time {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod deadline_notifications {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod notifications;
                pub mod notifications_in_memory;
                pub mod notifications_timer;
                pub mod project_repository;
            }
        }
    }
}

pub mod shell;
