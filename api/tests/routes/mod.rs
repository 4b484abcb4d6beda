mod auth_test;
mod files_test;
mod health_test;
mod tickets_test;
