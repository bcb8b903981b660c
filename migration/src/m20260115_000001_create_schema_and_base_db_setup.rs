use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS momentum")
            .await?;

        // Create recall_session_status enum
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE momentum.recall_session_status AS ENUM (
                    'active',
                    'stopped'
                )",
            )
            .await?;

        // Create recall_sessions table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.recall_sessions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL,
                user_id UUID NOT NULL,
                bot_id VARCHAR(255) NOT NULL,
                status momentum.recall_session_status NOT NULL DEFAULT 'active',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                ended_at TIMESTAMPTZ
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_recall_sessions_bot_id
                 ON momentum.recall_sessions (bot_id)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_recall_sessions_meeting_id_created_at
                 ON momentum.recall_sessions (meeting_id, created_at DESC)",
            )
            .await?;

        // Create meeting_transcripts table (append-only raw webhook payloads)
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.meeting_transcripts (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                bot_id VARCHAR(255) NOT NULL,
                meeting_id UUID,
                transcript_data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_transcripts_bot_id_created_at
                 ON momentum.meeting_transcripts (bot_id, created_at)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_transcripts_meeting_id
                 ON momentum.meeting_transcripts (meeting_id)",
            )
            .await?;

        // Create meeting_summaries table (canonical structured summary store)
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.meeting_summaries (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL,
                bot_id VARCHAR(255) NOT NULL,
                summary_type VARCHAR(100) NOT NULL,
                content JSONB NOT NULL,
                context_group VARCHAR(255) NOT NULL DEFAULT 'general',
                created_by UUID NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_summaries_meeting_id_created_at
                 ON momentum.meeting_summaries (meeting_id, created_at DESC)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_summaries_context_group
                 ON momentum.meeting_summaries (context_group)",
            )
            .await?;

        // Create action_items table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.action_items (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                owner VARCHAR(255) NOT NULL DEFAULT '',
                due_date VARCHAR(100),
                priority VARCHAR(50) NOT NULL DEFAULT 'medium',
                status VARCHAR(50) NOT NULL DEFAULT 'pending',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_action_items_meeting_id
                 ON momentum.action_items (meeting_id)",
            )
            .await?;

        // Create meeting_decisions table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.meeting_decisions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL,
                decision TEXT NOT NULL DEFAULT '',
                context TEXT NOT NULL DEFAULT '',
                impact TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_decisions_meeting_id
                 ON momentum.meeting_decisions (meeting_id)",
            )
            .await?;

        // Create meeting_discussions table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.meeting_discussions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL,
                topic TEXT NOT NULL DEFAULT '',
                summary TEXT NOT NULL DEFAULT '',
                participants JSONB NOT NULL DEFAULT '[]',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_discussions_meeting_id
                 ON momentum.meeting_discussions (meeting_id)",
            )
            .await?;

        // Create meeting_jargon table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.meeting_jargon (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL,
                term VARCHAR(255) NOT NULL DEFAULT '',
                clarification TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_jargon_meeting_id
                 ON momentum.meeting_jargon (meeting_id)",
            )
            .await?;

        // Create meeting_themes table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            CREATE TABLE IF NOT EXISTS momentum.meeting_themes (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL,
                themes JSONB NOT NULL DEFAULT '[]',
                context_group VARCHAR(255) NOT NULL DEFAULT 'general',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_meeting_themes_meeting_id
                 ON momentum.meeting_themes (meeting_id)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.meeting_themes")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.meeting_jargon")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.meeting_discussions")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.meeting_decisions")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.action_items")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.meeting_summaries")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.meeting_transcripts")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS momentum.recall_sessions")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS momentum.recall_session_status")
            .await?;

        Ok(())
    }
}
