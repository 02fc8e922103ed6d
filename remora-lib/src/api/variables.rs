use serde::Serialize;

use crate::{
    api::{ApiClient, Result},
    model::{GlobalVariable, LocalVariableDefinition, LocalVariableInstance},
};

impl ApiClient {
    // Globals

    pub async fn global_variables(&self) -> Result<Vec<GlobalVariable>> {
        self.get_json("/api/variables/global").await
    }

    pub async fn create_global_variable(&self, variable: &GlobalVariable) -> Result<()> {
        self.post_unit("/api/variables/global", variable).await
    }

    pub async fn update_global_variable(&self, name: &str, value: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Body<'a> {
            value: &'a str,
        }

        self.put_unit(&format!("/api/variables/global/{name}"), &Body { value })
            .await
    }

    pub async fn delete_global_variable(&self, name: &str) -> Result<()> {
        self.delete(&format!("/api/variables/global/{name}")).await
    }

    // Local definitions

    pub async fn local_definitions(&self) -> Result<Vec<LocalVariableDefinition>> {
        self.get_json("/api/variables/local-definitions").await
    }

    pub async fn local_definition(&self, id: &str) -> Result<LocalVariableDefinition> {
        self.get_json(&format!("/api/variables/local-definitions/{id}"))
            .await
    }

    pub async fn create_local_definition(
        &self,
        definition: &LocalVariableDefinition,
    ) -> Result<()> {
        self.post_unit("/api/variables/local-definitions", definition)
            .await
    }

    pub async fn update_local_definition(
        &self,
        id: &str,
        definition: &LocalVariableDefinition,
    ) -> Result<()> {
        self.put_unit(&format!("/api/variables/local-definitions/{id}"), definition)
            .await
    }

    pub async fn delete_local_definition(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/variables/local-definitions/{id}"))
            .await
    }

    // Local instances

    pub async fn local_instances(&self) -> Result<Vec<LocalVariableInstance>> {
        self.get_json("/api/variables/local-instances").await
    }

    pub async fn update_local_instance(&self, instance: &LocalVariableInstance) -> Result<()> {
        self.put_unit(
            &format!("/api/variables/local-instances/{}", instance.id),
            instance,
        )
        .await
    }

    pub async fn delete_local_instance(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/variables/local-instances/{id}"))
            .await
    }
}
