/// Generates the uniform `get_<entity>` / `delete_<entity>` REST methods
/// for a resource client whose entity lives at `<base_path>/:id`.
#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $base_path:literal) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: &str) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner
                        .get(format!(concat!($base_path, "/{}"), id))
                        .await
                        .map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                #[allow(dead_code)]
                pub async fn [<delete_ $entity_name_snake>](&self, id: &str) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner
                        .delete::<serde_json::Value>(format!(concat!($base_path, "/{}"), id))
                        .await
                        .map_err(<$error>::from)?;
                    Ok(())
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident) => {
        impl $client_name {
            pub fn new(inner: crate::api::ApiClient) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $base_path:literal) => {
        $crate::impl_client_new!($client_name);
        $crate::impl_client_methods!($client_name, $entity, $error, $entity_name_snake, $base_path);
    };
}
