use lab_core::category::ClientType;
use lab_core::client::ApiClient;
use lab_core::user::ClientRegistration;
use log::info;

pub async fn run_register(
    client: &ApiClient,
    name: String,
    email: String,
    document: String,
    client_type: ClientType,
) -> anyhow::Result<()> {
    let registration = ClientRegistration::new(name, email, document, client_type);
    let user = client.register_client(&registration).await?;
    info!(
        "[LAB] registered client {} ({})",
        registration.documento, client_type
    );
    println!(
        "Cliente registrado: {} <{}> id={}",
        user.nombre.as_deref().unwrap_or(&registration.nombre),
        user.email.as_deref().unwrap_or(&registration.email),
        user.id.as_deref().unwrap_or("-")
    );
    Ok(())
}
