use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub idusuario: i32,
    pub nombre: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,

    // Out-of-band reset secret, generated at registration
    pub secret: Option<String>,

    pub tipo_id: Option<i32>,
    pub is_admin: bool,
    pub created_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tipo_usuario::Entity",
        from = "Column::TipoId",
        to = "super::tipo_usuario::Column::Idtipo"
    )]
    TipoUsuario,
}

impl Related<super::tipo_usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TipoUsuario.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
