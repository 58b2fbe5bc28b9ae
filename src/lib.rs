pub mod shared {
    pub mod core {
        pub mod errors;
        pub mod identity;
        pub mod params;
    }
    pub mod infrastructure {
        pub mod authorizer;
        pub mod job_queue;
        pub mod notifier;
    }
}

pub mod modules {
    pub mod time_entries {
        pub mod core {
            pub mod aggregate;
            pub mod project;
            pub mod time_entry;
        }
        pub mod lifecycle {
            pub mod hooks;
            pub mod writer;
        }
        pub mod use_cases {
            pub mod log_time {
                pub mod command;
                pub mod handler;
                pub mod validator;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod bulk_log_time {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_hours {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod project_summary {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod time_log_store;
                pub mod time_log_store_in_memory;
            }
        }
    }

    pub mod billing {
        pub mod core {
            pub mod annual_report;
            pub mod invoice;
            pub mod timesheet_csv;
        }
        pub mod scheduled {
            pub mod daily_billing_summary;
            pub mod weekly_timesheet_reminder;
        }
        pub mod use_cases {
            pub mod generate_invoice {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod export_annual_report {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod download_timesheet_csv {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod all_employees_hours {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod job_runner;
            }
        }
    }

    pub mod status {
        pub mod use_cases {
            pub mod app_status {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
