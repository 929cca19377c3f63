use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Presupuestos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Presupuestos::Idpresupuesto)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Presupuestos::Nombre)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Presupuestos::Anno).integer().not_null())
                    .col(ColumnDef::new(Presupuestos::FechaIni).date().not_null())
                    .col(ColumnDef::new(Presupuestos::FechaFin).date().not_null())
                    .col(ColumnDef::new(Presupuestos::Status).string_len(40).null())
                    .col(ColumnDef::new(Presupuestos::Descripcion).text().null())
                    .col(
                        ColumnDef::new(Presupuestos::TipoCambio)
                            .decimal_len(12, 4)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Presupuestos::FactorInflacion)
                            .decimal_len(12, 4)
                            .null(),
                    )
                    .col(ColumnDef::new(Presupuestos::Observaciones).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cuentas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cuentas::Idcuenta)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cuentas::Nombre).string_len(255).not_null())
                    .col(ColumnDef::new(Cuentas::Codigo).string_len(40).null())
                    .col(ColumnDef::new(Cuentas::Descripcion).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Plantas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plantas::Idplanta)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plantas::Nombre).string_len(255).not_null())
                    .col(ColumnDef::new(Plantas::Ubicacion).string_len(255).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Conceptos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Conceptos::Idconcepto)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Conceptos::Nombre).string_len(255).not_null())
                    .col(ColumnDef::new(Conceptos::Descripcion).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Partidas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Partidas::Idpartida)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Partidas::Nombre).string_len(255).not_null())
                    .col(ColumnDef::new(Partidas::Monto).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Partidas::Idcuenta).integer().null())
                    .col(ColumnDef::new(Partidas::Idpresupuesto).integer().null())
                    .col(ColumnDef::new(Partidas::Descripcion).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Gastos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gastos::Idgasto)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gastos::Nombre).string_len(255).not_null())
                    .col(ColumnDef::new(Gastos::Anno).integer().not_null())
                    .col(ColumnDef::new(Gastos::Fecha).date().not_null())
                    .col(ColumnDef::new(Gastos::Proveedor).string_len(255).null())
                    .col(ColumnDef::new(Gastos::Monto).decimal_len(14, 2).not_null())
                    .col(ColumnDef::new(Gastos::Moneda).string_len(10).null())
                    .col(ColumnDef::new(Gastos::TipoCambio).decimal_len(12, 4).null())
                    .col(ColumnDef::new(Gastos::MontoBase).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Gastos::Status).string_len(40).null())
                    .col(ColumnDef::new(Gastos::Categoria).string_len(80).null())
                    .col(ColumnDef::new(Gastos::Idusuario).integer().null())
                    .col(ColumnDef::new(Gastos::Idcuenta).integer().null())
                    .col(ColumnDef::new(Gastos::Idplanta).integer().null())
                    .col(ColumnDef::new(Gastos::Idpresupuesto).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_gastos_idpresupuesto")
                    .table(Gastos::Table)
                    .col(Gastos::Idpresupuesto)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gastos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Partidas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Conceptos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plantas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cuentas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Presupuestos::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Presupuestos {
    Table,
    Idpresupuesto,
    Nombre,
    Anno,
    FechaIni,
    FechaFin,
    Status,
    Descripcion,
    TipoCambio,
    FactorInflacion,
    Observaciones,
}

#[derive(Iden)]
enum Gastos {
    Table,
    Idgasto,
    Nombre,
    Anno,
    Fecha,
    Proveedor,
    Monto,
    Moneda,
    TipoCambio,
    MontoBase,
    Status,
    Categoria,
    Idusuario,
    Idcuenta,
    Idplanta,
    Idpresupuesto,
}

#[derive(Iden)]
enum Cuentas {
    Table,
    Idcuenta,
    Nombre,
    Codigo,
    Descripcion,
}

#[derive(Iden)]
enum Partidas {
    Table,
    Idpartida,
    Nombre,
    Monto,
    Idcuenta,
    Idpresupuesto,
    Descripcion,
}

#[derive(Iden)]
enum Plantas {
    Table,
    Idplanta,
    Nombre,
    Ubicacion,
}

#[derive(Iden)]
enum Conceptos {
    Table,
    Idconcepto,
    Nombre,
    Descripcion,
}
