use quillpen::{
    app_info::AppInfo,
    boot::{boot, BootConfig},
    jobs::builtin::builtin_registry,
};

#[tokio::main]
async fn main() {
    boot(BootConfig::new(AppInfo::quillpen(), builtin_registry())).await;
}
