use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // tipo_usuario lookup first: usuarios carries a FK into it
        manager
            .create_table(
                Table::create()
                    .table(TipoUsuario::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TipoUsuario::Idtipo)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TipoUsuario::Codigo)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TipoUsuario::Nombre)
                            .string_len(60)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the reference entries the resolver expects
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(TipoUsuario::Table)
                    .columns([TipoUsuario::Codigo, TipoUsuario::Nombre])
                    .values_panic(["1".into(), "Interno".into()])
                    .values_panic(["2".into(), "Externo".into()])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Idusuario)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::Nombre)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::Secret)
                            .string_len(30)
                            .null(),
                    )
                    .col(ColumnDef::new(Usuarios::TipoId).integer().null())
                    .col(
                        ColumnDef::new(Usuarios::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuarios_tipo")
                            .from(Usuarios::Table, Usuarios::TipoId)
                            .to(TipoUsuario::Table, TipoUsuario::Idtipo),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usuarios_email")
                    .table(Usuarios::Table)
                    .col(Usuarios::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TipoUsuario::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Usuarios {
    Table,
    Idusuario,
    Nombre,
    Email,
    PasswordHash,
    Secret,
    TipoId,
    IsAdmin,
    CreatedAt,
}

#[derive(Iden)]
enum TipoUsuario {
    Table,
    Idtipo,
    Codigo,
    Nombre,
}
